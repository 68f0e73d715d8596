use crate::model::{ProductId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Created,
    Paid,
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub total: f64,
    pub status: OrderStatus,
}

impl Order {
    /// Creates a new Order instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `user_id` - ID of the user placing the order
    /// * `product_id` - ID of the product being ordered
    /// * `quantity` - Quantity ordered
    /// * `total` - Total price for the order
    ///
    /// # Notes
    /// The order is initialized with status [`OrderStatus::Created`].
    pub fn new(
        id: OrderId,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
        total: f64,
    ) -> Self {
        Self {
            id,
            user_id,
            product_id,
            quantity,
            total,
            status: OrderStatus::Created,
        }
    }

    /// An order imported from a system where it was already settled.
    pub fn paid(
        id: OrderId,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
        total: f64,
    ) -> Self {
        Self {
            status: OrderStatus::Paid,
            ..Self::new(id, user_id, product_id, quantity, total)
        }
    }
}

//! # Model Catalog
//!
//! Registers the constructors of every [`model`](crate::model) type. This is the
//! single place where the recipe tells the provider which ways of building a
//! type exist; everything else resolves by signature.
//!
//! | Target | Signature | Constructor |
//! |--------|-----------|-------------|
//! | `Point` | `(f64, f64)` | `Point::new` |
//! | `Point` | `()` | `Point::origin` (private) |
//! | `User` | `(UserId, String, String)` | `User::new` |
//! | `User` | `(UserId)` | `User::guest` |
//! | `Product` | `(ProductId, String, f64, u32)` | `Product::new` |
//! | `Product` | `(ProductId, String)` | `Product::unlisted` |
//! | `Order` | `(OrderId, UserId, ProductId, u32, f64)` | `Order::new` |
//! | `Order` | `(OrderId, UserId, ProductId, u32, f64, bool)` | `Order::new` or `Order::paid` |

use crate::model::{Order, OrderId, Point, Product, ProductId, User, UserId};
use ctor_provider::{ConstructorRegistry, RegistryProvider};
use std::sync::Arc;
use tracing::info;

/// Builds the registry with all model constructors.
pub fn model_registry() -> ConstructorRegistry {
    let mut registry = ConstructorRegistry::new();

    registry
        .register("Point::new", Point::new)
        .register_private("Point::origin", Point::origin);

    registry
        .register("User::new", |id: UserId, name: String, email: String| {
            User::new(id, name, email)
        })
        .register("User::guest", User::guest);

    registry
        .register(
            "Product::new",
            |id: ProductId, name: String, price: f64, quantity: u32| {
                Product::new(id, name, price, quantity)
            },
        )
        .register("Product::unlisted", |id: ProductId, name: String| {
            Product::unlisted(id, name)
        });

    registry
        .register("Order::new", Order::new)
        .register("Order::with_status", order_with_status);

    info!(constructors = registry.len(), "Model catalog ready");
    registry
}

fn order_with_status(
    id: OrderId,
    user_id: UserId,
    product_id: ProductId,
    quantity: u32,
    total: f64,
    paid: bool,
) -> Order {
    if paid {
        Order::paid(id, user_id, product_id, quantity, total)
    } else {
        Order::new(id, user_id, product_id, quantity, total)
    }
}

/// A provider over [`model_registry`], cheap to clone and share between tasks.
pub fn model_provider() -> RegistryProvider<Arc<ConstructorRegistry>> {
    RegistryProvider::new(Arc::new(model_registry()))
}

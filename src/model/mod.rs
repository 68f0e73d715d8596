//! Plain data types built through the [`catalog`](crate::catalog) registry.

pub mod order;
pub mod point;
pub mod product;
pub mod user;

pub use order::*;
pub use point::*;
pub use product::*;
pub use user::*;

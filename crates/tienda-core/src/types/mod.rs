//! Core domain types for the store.

mod ids;
mod order;
mod product;
mod proptests;
mod user;

pub use ids::{OrderId, ProductId, UserId};
pub use order::{Order, OrderLine};
pub use product::{NewProduct, Product, ProductKind, ProductTag};
pub use user::{Role, User, UserKind, validate_email};

//! Tienda Core: domain types, errors, and the in-memory store service.
//!
//! This crate has no internal Tienda dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: Users, products, orders, and their identifiers
//! - [`store`]: The shared [`Store`] service

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use store::Store;
pub use types::{
    NewProduct, Order, OrderId, OrderLine, Product, ProductId, ProductKind, ProductTag, Role,
    User, UserId, UserKind,
};

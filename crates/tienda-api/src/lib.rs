//! # tienda-api
//!
//! HTTP API server for Tienda.
//!
//! This crate provides the HTTP API server:
//! - JSON endpoints for users, products and orders
//! - Login accounts and bearer-token protection for writes
//! - Request validation and error handling

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod routes;
pub mod schemas;
pub mod server;
pub mod state;

pub use error::{Error, Result};
pub use routes::router;
pub use server::{Server, ServerConfig};
pub use state::AppState;

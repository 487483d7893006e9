//! # tienda-cli
//!
//! Command-line entry point for the Tienda API server.
//!
//! This crate provides:
//! - The `tienda` binary (`serve`, the default, and `config` management)
//! - TOML configuration with `TIENDA_*` environment overrides
//! - Wiring from configuration to a running [`tienda_api::Server`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod serve;

pub use config::TiendaConfig;
pub use error::{Error, Result};

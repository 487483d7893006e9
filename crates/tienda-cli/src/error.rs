//! Error types for tienda-cli

use thiserror::Error;

/// Result type alias for tienda-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tienda-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from tienda-core (configuration, I/O)
    #[error("Core error: {0}")]
    Core(#[from] tienda_core::Error),

    /// Error from tienda-auth (secret key resolution)
    #[error("Auth error: {0}")]
    Auth(#[from] tienda_auth::AuthError),

    /// Error from tienda-api (bind, serve)
    #[error("Server error: {0}")]
    Api(#[from] tienda_api::Error),
}

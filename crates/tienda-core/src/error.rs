//! Error types for the Tienda core library.

use std::path::Path;

/// Errors that can occur in store operations.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No user is registered under the given ID.
    #[error("User not found: {id}")]
    UserNotFound {
        /// ID that was looked up
        id: String,
    },

    /// No product is registered under the given ID.
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// ID that was looked up
        id: String,
    },

    /// The user exists but is not a customer, so it cannot own orders.
    #[error("User {id} is not a customer")]
    NotACustomer {
        /// ID of the offending user
        id: String,
    },

    /// Requested quantity exceeds available stock.
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product name
        product: String,
        /// Quantity requested
        requested: u64,
        /// Quantity on hand
        available: u32,
    },

    /// An order was submitted without any items.
    #[error("Order must contain at least one item")]
    EmptyOrder,

    /// Unknown user kind on registration.
    #[error("Invalid user kind '{0}'. Use 'cliente' or 'admin'")]
    InvalidUserKind(String),

    /// Unknown product kind on creation.
    #[error("Invalid product kind '{0}'. Use 'generico', 'electronico' or 'ropa'")]
    InvalidProductKind(String),

    /// An identifier could not be parsed.
    #[error("Invalid ID '{value}': {reason}")]
    InvalidId {
        /// Raw input
        value: String,
        /// Parser message
        reason: String,
    },

    /// Input failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation, if known
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error, optionally tied to a path.
    #[error("I/O error{}: {source}", path.as_ref().map(|p| format!(" at {p}")).unwrap_or_default())]
    Io {
        /// Path involved, if any
        path: Option<String>,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Convenience `Result` type alias for Tienda core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }
}

impl Error {
    /// Returns whether this error means a referenced entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::UserNotFound { .. } | Error::ProductNotFound { .. }
        )
    }

    /// Returns whether this error was caused by the caller's input rather than
    /// by the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::Config { .. } | Error::Io { .. })
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that triggered it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: Some(path.as_ref().display().to_string()),
            source,
        }
    }

    /// Creates an invalid-ID error.
    pub fn invalid_id(value: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidId {
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

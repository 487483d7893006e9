//! Error types for tienda-api

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use tienda_auth::AuthError;

/// Result type alias for tienda-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tienda-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from tienda-core
    #[error(transparent)]
    Core(#[from] tienda_core::Error),

    /// Error from tienda-auth
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request body could not be decoded
    #[error("Invalid request body: {message}")]
    InvalidBody {
        /// Status chosen by the JSON extractor (400, 415 or 422)
        status: StatusCode,
        /// Decoder message
        message: String,
    },

    /// Token was valid but its account no longer exists
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// Server I/O error (bind, accept)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Core(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Error::Core(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Error::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Auth(e) if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
            Error::Auth(AuthError::DuplicateUsername(_) | AuthError::DuplicateEmail(_)) => {
                StatusCode::CONFLICT
            }
            Error::Auth(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Error::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidBody { status, .. } => *status,
            Error::UnknownAccount(_) => StatusCode::UNAUTHORIZED,
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable category for the error body.
    pub fn category(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::UNAUTHORIZED => "authentication",
            StatusCode::CONFLICT => "conflict",
            s if s.is_client_error() => "invalid_request",
            _ => "internal",
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = serde_json::json!({
            "error": {
                "category": self.category(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

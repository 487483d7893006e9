//! Auth-specific error types.

/// Errors that can occur during authentication and account management.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header or bearer token present.
    #[error("missing authentication token")]
    MissingToken,

    /// Token format is invalid (not a valid JWT).
    #[error("invalid token format: {0}")]
    InvalidFormat(String),

    /// JWT signature verification failed.
    #[error("invalid token signature: {0}")]
    InvalidSignature(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Username or password did not match.
    #[error("incorrect username or password")]
    InvalidCredentials,

    /// Username is already registered.
    #[error("username '{0}' is already registered")]
    DuplicateUsername(String),

    /// Email is already registered.
    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),

    /// Registration input failed validation.
    #[error("invalid account data: {0}")]
    Validation(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Token could not be signed.
    #[error("failed to create token: {0}")]
    TokenCreation(String),

    /// Signing key could not be read or persisted.
    #[error("secret key error: {0}")]
    SecretKey(String),
}

impl AuthError {
    /// Whether this error should result in a 4xx (vs. a 500).
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            AuthError::Hashing(_) | AuthError::TokenCreation(_) | AuthError::SecretKey(_)
        )
    }

    /// Whether this error means the caller is not authenticated (401).
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidFormat(_)
                | AuthError::InvalidSignature(_)
                | AuthError::Expired
                | AuthError::InvalidCredentials
        )
    }
}

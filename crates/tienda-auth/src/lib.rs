//! Authentication primitives for Tienda.
//!
//! Provides:
//! - [`AccountService`] - Login accounts with bcrypt-hashed passwords
//! - [`TokenIssuer`] / [`JwtValidator`] - HS256 access tokens
//! - [`TokenValidator`] - Trait for async token validation
//! - [`AuthLayer`] / [`AuthService`] - Tower middleware parameterised over `TokenValidator`
//! - [`AuthConfig`] - Configuration for the auth layer
//! - [`AuthError`] - Auth-specific error types

mod accounts;
mod error;
mod jwt;
mod middleware;
pub mod password;
pub mod secret;
mod user;

pub use accounts::{Account, AccountService};
pub use error::AuthError;
pub use jwt::{Claims, DEFAULT_TOKEN_TTL, JwtValidator, TokenIssuer};
pub use middleware::{AuthLayer, AuthService};
pub use user::{AuthenticatedUser, subject_from_parts, user_from_parts};

/// Configuration for the auth middleware.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Whether authentication is enabled. When false, all requests pass through.
    pub enabled: bool,
    /// Expected `iss` claim on incoming tokens.
    pub issuer: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            issuer: "tienda".to_string(),
        }
    }
}

impl AuthConfig {
    /// A config with authentication switched on.
    pub fn enabled(issuer: impl Into<String>) -> Self {
        Self {
            enabled: true,
            issuer: issuer.into(),
        }
    }
}

/// Trait for validating tokens and extracting user identity.
///
/// The middleware calls `validate()` with the bearer token and returns
/// the authenticated user on success.
pub trait TokenValidator: Send + Sync + 'static {
    /// Validate a token and return the authenticated user.
    fn validate(
        &self,
        token: &str,
        config: &AuthConfig,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>,
    >;
}

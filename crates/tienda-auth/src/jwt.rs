//! HS256 access tokens.
//!
//! [`TokenIssuer`] signs and verifies tokens with a shared secret.
//! [`JwtValidator`] adapts it to the [`TokenValidator`] trait used by the
//! auth middleware.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{Account, AuthConfig, AuthError, AuthenticatedUser, TokenValidator};

/// Default access token lifetime (30 minutes).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Claims carried by a Tienda access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account username.
    pub sub: String,
    /// Account email.
    pub email: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (seconds since the epoch).
    pub iat: i64,
    /// Expiry (seconds since the epoch).
    pub exp: i64,
}

/// Signs and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer from a shared secret.
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl,
        }
    }

    /// Default token lifetime for this issuer.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issuer name written to the `iss` claim.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue a token for `account`, valid for `ttl` or the issuer default.
    pub fn issue(&self, account: &Account, ttl: Option<Duration>) -> Result<String, AuthError> {
        self.issue_at(
            &account.username,
            &account.email,
            Utc::now(),
            ttl.unwrap_or(self.ttl),
        )
    }

    /// Issue a token with an explicit issue time.
    pub fn issue_at(
        &self,
        subject: &str,
        email: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AuthError::TokenCreation(format!("invalid ttl: {e}")))?;
        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Verify signature, issuer and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AuthError::InvalidFormat("invalid issuer".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::Base64(_)
                | jsonwebtoken::errors::ErrorKind::Json(_)
                | jsonwebtoken::errors::ErrorKind::Utf8(_)
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::InvalidFormat(e.to_string())
                }
                _ => AuthError::InvalidSignature(e.to_string()),
            })
    }
}

/// [`TokenValidator`] backed by a [`TokenIssuer`].
#[derive(Clone)]
pub struct JwtValidator {
    issuer: Arc<TokenIssuer>,
}

impl JwtValidator {
    /// Create a validator sharing the given issuer.
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        Self { issuer }
    }
}

impl TokenValidator for JwtValidator {
    fn validate(
        &self,
        token: &str,
        config: &AuthConfig,
    ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>> {
        let token = token.to_string();
        let expected_issuer = config.issuer.clone();
        Box::pin(async move {
            let claims = self.issuer.verify(&token)?;
            if !expected_issuer.is_empty() && claims.iss != expected_issuer {
                return Err(AuthError::InvalidFormat(format!(
                    "unexpected issuer '{}'",
                    claims.iss
                )));
            }
            Ok(AuthenticatedUser {
                email: claims.email,
                subject: claims.sub,
            })
        })
    }
}

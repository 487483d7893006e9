//! Tower authentication middleware.
//!
//! [`AuthLayer`] wraps a service so that every request must carry a valid
//! `Authorization: Bearer <token>` header. The validated identity is stored in
//! the request extensions as an [`AuthenticatedUser`](crate::AuthenticatedUser).
//! With [`AuthConfig::enabled`] false the layer forwards everything untouched.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, Request, StatusCode, header};
use tower::{Layer, Service};

use crate::{AuthConfig, AuthError, TokenValidator};

const BEARER: &str = "bearer";

/// Layer that puts bearer-token checks in front of a service.
#[derive(Clone)]
pub struct AuthLayer<V: TokenValidator> {
    validator: Arc<V>,
    config: AuthConfig,
}

impl<V: TokenValidator> AuthLayer<V> {
    /// Create a layer checking tokens with `validator`.
    pub fn new(validator: Arc<V>, config: AuthConfig) -> Self {
        Self { validator, config }
    }
}

impl<V: TokenValidator, S> Layer<S> for AuthLayer<V> {
    type Service = AuthService<V, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            validator: Arc::clone(&self.validator),
            config: self.config.clone(),
        }
    }
}

/// Service produced by [`AuthLayer`].
#[derive(Clone)]
pub struct AuthService<V: TokenValidator, S> {
    inner: S,
    validator: Arc<V>,
    config: AuthConfig,
}

impl<V, S> Service<Request<Body>> for AuthService<V, S>
where
    V: TokenValidator,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        // The readied service handles this request; a fresh clone takes its place.
        let fresh = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, fresh);
        let validator = Arc::clone(&self.validator);
        let config = self.config.clone();

        Box::pin(async move {
            if config.enabled {
                if let Err(err) = authorize(validator.as_ref(), &config, &mut req).await {
                    log::warn!("Rejected {} {}: {err}", req.method(), req.uri().path());
                    return Ok(reject(&err));
                }
            }

            let Ok(resp) = inner.call(req).await;
            Ok(resp.into_response())
        })
    }
}

/// Validate the bearer token and attach the identity to `req`.
async fn authorize<V: TokenValidator>(
    validator: &V,
    config: &AuthConfig,
    req: &mut Request<Body>,
) -> Result<(), AuthError> {
    let token = bearer_token(req.headers())?.to_string();
    let user = validator.validate(&token, config).await?;
    log::debug!("Authenticated '{}'", user.subject);
    req.extensions_mut().insert(user);
    Ok(())
}

/// Token from an `Authorization: Bearer` header. The scheme is matched
/// case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("authorization header is not ASCII".into()))?;

    let (scheme, token) = value.trim().split_once(' ').unwrap_or((value.trim(), ""));
    if !scheme.eq_ignore_ascii_case(BEARER) {
        return Err(AuthError::InvalidFormat(format!(
            "unsupported authorization scheme '{scheme}'"
        )));
    }

    match token.trim() {
        "" => Err(AuthError::MissingToken),
        token => Ok(token),
    }
}

fn reject(err: &AuthError) -> Response {
    unauthorized_response(&err.to_string())
}

/// 401 with a JSON error body and a `WWW-Authenticate: Bearer` challenge.
pub(crate) fn unauthorized_response(message: &str) -> Response {
    let body = serde_json::json!({
        "error": {
            "category": "authentication",
            "message": message,
        }
    });

    (
        StatusCode::UNAUTHORIZED,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::WWW_AUTHENTICATE, r#"Bearer realm="tienda""#),
        ],
        body.to_string(),
    )
        .into_response()
}

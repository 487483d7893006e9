//! Authenticated user identity and extraction helpers.

use axum::extract::FromRequestParts;
use axum::response::Response;

/// An authenticated user identity, extracted from a validated token.
///
/// Stored in HTTP request extensions by the auth middleware. Handlers can
/// take it directly as an extractor; extraction fails with 401 when no
/// user was attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's email address.
    pub email: String,
    /// The account username (from the `sub` claim).
    pub subject: String,
}

/// Extract the `AuthenticatedUser` from HTTP request `Parts`, if present.
pub fn user_from_parts(parts: &http::request::Parts) -> Option<&AuthenticatedUser> {
    parts.extensions.get::<AuthenticatedUser>()
}

/// Extract the subject (username) from HTTP request `Parts`.
///
/// Returns `"anonymous"` if no authenticated user is present (auth disabled).
pub fn subject_from_parts(parts: &http::request::Parts) -> &str {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .map(|u| u.subject.as_str())
        .unwrap_or("anonymous")
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        user_from_parts(parts)
            .cloned()
            .ok_or_else(|| crate::middleware::unauthorized_response("authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts_with_user() -> http::request::Parts {
        let (mut parts, _body) = http::Request::new(()).into_parts();
        parts.extensions.insert(AuthenticatedUser {
            email: "ana@example.com".to_string(),
            subject: "ana".to_string(),
        });
        parts
    }

    fn parts_without_user() -> http::request::Parts {
        let (parts, _body) = http::Request::new(()).into_parts();
        parts
    }

    #[test]
    fn test_user_from_parts_present() {
        let parts = parts_with_user();
        let user = user_from_parts(&parts).unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.subject, "ana");
    }

    #[test]
    fn test_user_from_parts_absent() {
        let parts = parts_without_user();
        assert!(user_from_parts(&parts).is_none());
    }

    #[test]
    fn test_subject_from_parts() {
        assert_eq!(subject_from_parts(&parts_with_user()), "ana");
        assert_eq!(subject_from_parts(&parts_without_user()), "anonymous");
    }

    #[tokio::test]
    async fn test_extractor_present() {
        let mut parts = parts_with_user();
        let user = AuthenticatedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user.subject, "ana");
    }

    #[tokio::test]
    async fn test_extractor_absent_is_401() {
        let mut parts = parts_without_user();
        let rejection = AuthenticatedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(rejection.status(), http::StatusCode::UNAUTHORIZED);
    }
}

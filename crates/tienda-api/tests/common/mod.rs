//! Common test utilities and harness for tienda-api integration tests.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use tienda_api::{AppState, router};
use tienda_auth::{AccountService, AuthConfig, TokenIssuer};
use tienda_core::Store;

/// Signing secret shared by every harness.
pub const SECRET: &[u8] = b"integration-test-secret";

/// In-process application driven through `tower::ServiceExt::oneshot`.
pub struct TestApp {
    /// Shared state behind the router
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// App with write protection switched off.
    pub fn new() -> Self {
        Self::with_auth(AuthConfig::default())
    }

    /// App with write protection switched on.
    pub fn protected() -> Self {
        Self::with_auth(AuthConfig::enabled("tienda"))
    }

    fn with_auth(auth: AuthConfig) -> Self {
        let tokens = TokenIssuer::new(SECRET, "tienda", Duration::from_secs(30 * 60));
        // Cheapest bcrypt cost keeps the suite fast.
        let state = AppState::with_parts(Store::new(), AccountService::with_cost(4), tokens);
        let router = router(state.clone(), &auth);
        Self { state, router }
    }

    /// Send a request and decode the JSON response (`Null` for empty bodies).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// `GET` without a token.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    /// `POST` a JSON body without a token.
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    /// `DELETE` without a token.
    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None, None).await
    }

    /// Register a customer and return its ID.
    pub async fn customer(&self, name: &str) -> String {
        let (status, body) = self
            .post(
                "/usuarios",
                json!({
                    "nombre": name,
                    "email": format!("{}@example.com", name.to_lowercase()),
                    "tipo": "cliente",
                    "direccion_postal": "Calle Mayor 1",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Add a generic product and return its ID.
    pub async fn product(&self, name: &str, price: f64, stock: u32) -> String {
        let (status, body) = self
            .post(
                "/productos",
                json!({"tipo": "generico", "nombre": name, "precio": price, "stock": stock}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Register an account and log in, returning the bearer token.
    pub async fn login(&self, username: &str) -> String {
        let password = "correct horse battery staple";
        let (status, body) = self
            .post(
                "/auth/register",
                json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": password,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        let (status, body) = self
            .post(
                "/auth/token",
                json!({"username": username, "password": password}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["access_token"].as_str().unwrap().to_string()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

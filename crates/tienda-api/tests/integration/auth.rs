//! Accounts, tokens and write protection.

use http::{Method, StatusCode};
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::protected();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_register_and_login() {
    let app = TestApp::new();
    let token = app.login("ana").await;
    assert_eq!(token.split('.').count(), 3);

    let (status, body) = app.send(Method::GET, "/auth/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ana");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_token_response_shape() {
    let app = TestApp::new();
    app.post(
        "/auth/register",
        json!({"username": "ana", "email": "ana@example.com", "password": "pw"}),
    )
    .await;
    let (status, body) = app
        .post("/auth/token", json!({"username": "ana", "password": "pw"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 1800);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.login("ana").await;

    let (status, body) = app
        .post("/auth/token", json!({"username": "ana", "password": "nope"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["category"], "authentication");

    let (status, _) = app
        .post("/auth/token", json!({"username": "ghost", "password": "nope"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = TestApp::new();
    app.login("ana").await;

    let (status, body) = app
        .post(
            "/auth/register",
            json!({"username": "ana", "email": "other@example.com", "password": "pw"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["category"], "conflict");
}

#[tokio::test]
async fn test_account_routes_always_need_token() {
    let app = TestApp::new();
    let (status, _) = app.get("/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/auth/accounts").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_accounts() {
    let app = TestApp::new();
    let token = app.login("ana").await;
    app.login("luis").await;

    let (status, body) = app
        .send(Method::GET, "/auth/accounts", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["ana", "luis"]);
}

#[tokio::test]
async fn test_writes_open_when_auth_disabled() {
    let app = TestApp::new();
    app.product("Mug", 2.5, 10).await;
}

#[tokio::test]
async fn test_writes_need_token_when_enabled() {
    let app = TestApp::protected();
    let draft = json!({"tipo": "generico", "nombre": "Mug", "precio": 2.5, "stock": 10});

    let (status, _) = app.post("/productos", draft.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.login("ana").await;
    let (status, body) = app
        .send(Method::POST, "/productos", Some(draft), Some(&token))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Reads stay public.
    let id = body["id"].as_str().unwrap();
    let (status, _) = app.get(&format!("/productos/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete(&format!("/productos/{id}")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app
        .send(Method::DELETE, &format!("/productos/{id}"), None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = TestApp::protected();
    let (status, _) = app
        .send(
            Method::POST,
            "/pedidos",
            Some(json!({"id_cliente": uuid::Uuid::new_v4(), "items": []})),
            Some("not.a.jwt"),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

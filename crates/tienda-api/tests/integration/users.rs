//! `/usuarios` endpoints.

use http::StatusCode;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_create_and_get_customer() {
    let app = TestApp::new();
    let id = app.customer("Ana").await;

    let (status, body) = app.get(&format!("/usuarios/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nombre"], "Ana");
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["es_admin"], false);
}

#[tokio::test]
async fn test_create_admin() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/usuarios",
            json!({"nombre": "Root", "email": "root@example.com", "tipo": "admin"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["es_admin"], true);
}

#[tokio::test]
async fn test_list_users_in_registration_order() {
    let app = TestApp::new();
    app.customer("Ana").await;
    app.customer("Luis").await;

    let (status, body) = app.get("/usuarios").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Ana", "Luis"]);
}

#[tokio::test]
async fn test_unknown_user_kind_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/usuarios",
            json!({"nombre": "Eve", "email": "eve@example.com", "tipo": "Cliente"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["category"], "invalid_request");
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let app = TestApp::new();
    let (status, _) = app
        .post(
            "/usuarios",
            json!({"nombre": "Eve", "email": "not-an-email", "tipo": "cliente"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_field_is_unprocessable() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/usuarios", json!({"nombre": "Eve", "tipo": "cliente"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["category"], "invalid_request");
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = TestApp::new();
    let id = uuid::Uuid::new_v4();
    let (status, body) = app.get(&format!("/usuarios/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["category"], "not_found");
}

#[tokio::test]
async fn test_malformed_user_id_is_bad_request() {
    let app = TestApp::new();
    let (status, _) = app.get("/usuarios/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

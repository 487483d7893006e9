//! `/productos` endpoints.

use http::StatusCode;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_create_electronic_product() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/productos",
            json!({
                "tipo": "Electronico",
                "nombre": "Laptop",
                "precio": 999.99,
                "stock": 5,
                "meses_garantia": 24,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["tipo"], "electronico");
    assert_eq!(body["meses_garantia"], 24);
    assert!(body.get("talla").is_none());
}

#[tokio::test]
async fn test_create_clothing_product() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/productos",
            json!({
                "tipo": "ropa",
                "nombre": "Camiseta",
                "precio": 15.0,
                "stock": 10,
                "talla": "M",
                "color": "azul",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["talla"], "M");
    assert_eq!(body["color"], "azul");
}

#[tokio::test]
async fn test_clothing_without_size_rejected() {
    let app = TestApp::new();
    let (status, _) = app
        .post(
            "/productos",
            json!({"tipo": "ropa", "nombre": "Camiseta", "precio": 15.0, "stock": 10}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_product_kind_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/productos",
            json!({"tipo": "comida", "nombre": "Pan", "precio": 1.0, "stock": 1}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("comida")
    );
}

#[tokio::test]
async fn test_negative_price_rejected() {
    let app = TestApp::new();
    let (status, _) = app
        .post(
            "/productos",
            json!({"tipo": "generico", "nombre": "Mug", "precio": -1.0, "stock": 1}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_and_get_products() {
    let app = TestApp::new();
    let mug = app.product("Mug", 2.5, 10).await;
    app.product("Plate", 4.0, 3).await;

    let (status, body) = app.get("/productos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["nombre"], "Mug");

    let (status, body) = app.get(&format!("/productos/{mug}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stock"], 10);
}

#[tokio::test]
async fn test_delete_product() {
    let app = TestApp::new();
    let mug = app.product("Mug", 2.5, 10).await;

    let (status, body) = app.delete(&format!("/productos/{mug}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&format!("/productos/{mug}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_product_is_not_found() {
    let app = TestApp::new();
    let id = uuid::Uuid::new_v4();
    let (status, _) = app.delete(&format!("/productos/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//! `/pedidos` endpoints.

use http::StatusCode;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_place_order_decrements_stock() {
    let app = TestApp::new();
    let ana = app.customer("Ana").await;
    let mug = app.product("Mug", 2.5, 10).await;
    let plate = app.product("Plate", 4.0, 3).await;

    let (status, body) = app
        .post(
            "/pedidos",
            json!({
                "id_cliente": ana,
                "items": [
                    {"id_producto": mug, "cantidad": 4},
                    {"id_producto": plate, "cantidad": 1},
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["cliente"], "Ana");
    assert_eq!(body["total"], 14.0);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0]["subtotal"], 10.0);

    let (_, body) = app.get(&format!("/productos/{mug}")).await;
    assert_eq!(body["stock"], 6);
    let (_, body) = app.get(&format!("/productos/{plate}")).await;
    assert_eq!(body["stock"], 2);
}

#[tokio::test]
async fn test_insufficient_stock_changes_nothing() {
    let app = TestApp::new();
    let ana = app.customer("Ana").await;
    let mug = app.product("Mug", 2.5, 10).await;
    let plate = app.product("Plate", 4.0, 3).await;

    let (status, body) = app
        .post(
            "/pedidos",
            json!({
                "id_cliente": ana,
                "items": [
                    {"id_producto": mug, "cantidad": 4},
                    {"id_producto": plate, "cantidad": 5},
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Insufficient stock")
    );

    let (_, body) = app.get(&format!("/productos/{mug}")).await;
    assert_eq!(body["stock"], 10);

    let (_, body) = app.get(&format!("/usuarios/{ana}/pedidos")).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_cannot_order() {
    let app = TestApp::new();
    let (_, admin) = app
        .post(
            "/usuarios",
            json!({"nombre": "Root", "email": "root@example.com", "tipo": "admin"}),
        )
        .await;
    let mug = app.product("Mug", 2.5, 10).await;

    let (status, _) = app
        .post(
            "/pedidos",
            json!({
                "id_cliente": admin["id"],
                "items": [{"id_producto": mug, "cantidad": 1}],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_customer_is_not_found() {
    let app = TestApp::new();
    let mug = app.product("Mug", 2.5, 10).await;

    let (status, _) = app
        .post(
            "/pedidos",
            json!({
                "id_cliente": uuid::Uuid::new_v4(),
                "items": [{"id_producto": mug, "cantidad": 1}],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let app = TestApp::new();
    let ana = app.customer("Ana").await;

    let (status, _) = app
        .post(
            "/pedidos",
            json!({
                "id_cliente": ana,
                "items": [{"id_producto": uuid::Uuid::new_v4(), "cantidad": 1}],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_order_rejected() {
    let app = TestApp::new();
    let ana = app.customer("Ana").await;

    let (status, _) = app
        .post("/pedidos", json!({"id_cliente": ana, "items": []}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_quantity_rejected_without_touching_stock() {
    let app = TestApp::new();
    let ana = app.customer("Ana").await;
    let mug = app.product("Mug", 2.5, 10).await;

    let (status, body) = app
        .post(
            "/pedidos",
            json!({
                "id_cliente": ana,
                "items": [
                    {"id_producto": mug, "cantidad": 1},
                    {"id_producto": mug, "cantidad": 0},
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["category"], "invalid_request");

    let (_, product) = app.get(&format!("/productos/{mug}")).await;
    assert_eq!(product["stock"], 10);
    let (_, history) = app.get(&format!("/usuarios/{ana}/pedidos")).await;
    assert_eq!(history.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_history_of_admin_is_bad_request() {
    let app = TestApp::new();
    let (_, admin) = app
        .post(
            "/usuarios",
            json!({"nombre": "Root", "email": "root@example.com", "tipo": "admin"}),
        )
        .await;
    let admin = admin["id"].as_str().unwrap();

    let (status, body) = app.get(&format!("/usuarios/{admin}/pedidos")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("not a customer")
    );
}

#[tokio::test]
async fn test_history_of_unknown_or_malformed_user() {
    let app = TestApp::new();

    let unknown = uuid::Uuid::new_v4();
    let (status, _) = app.get(&format!("/usuarios/{unknown}/pedidos")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/usuarios/not-a-uuid/pedidos").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_lines_are_merged() {
    let app = TestApp::new();
    let ana = app.customer("Ana").await;
    let mug = app.product("Mug", 2.5, 10).await;

    let (status, body) = app
        .post(
            "/pedidos",
            json!({
                "id_cliente": ana,
                "items": [
                    {"id_producto": mug, "cantidad": 2},
                    {"id_producto": mug, "cantidad": 3},
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["cantidad"], 5);

    let (_, body) = app.get(&format!("/productos/{mug}")).await;
    assert_eq!(body["stock"], 5);
}

#[tokio::test]
async fn test_order_history_per_customer() {
    let app = TestApp::new();
    let ana = app.customer("Ana").await;
    let luis = app.customer("Luis").await;
    let mug = app.product("Mug", 2.5, 10).await;

    for customer in [&ana, &ana, &luis] {
        let (status, _) = app
            .post(
                "/pedidos",
                json!({
                    "id_cliente": customer,
                    "items": [{"id_producto": mug, "cantidad": 1}],
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get(&format!("/usuarios/{ana}/pedidos")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = app.get(&format!("/usuarios/{luis}/pedidos")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_order_snapshot_survives_product_removal() {
    let app = TestApp::new();
    let ana = app.customer("Ana").await;
    let mug = app.product("Mug", 2.5, 10).await;

    app.post(
        "/pedidos",
        json!({"id_cliente": ana, "items": [{"id_producto": mug, "cantidad": 2}]}),
    )
    .await;
    app.delete(&format!("/productos/{mug}")).await;

    let (_, body) = app.get(&format!("/usuarios/{ana}/pedidos")).await;
    assert_eq!(body[0]["items"][0]["nombre_producto"], "Mug");
    assert_eq!(body[0]["total"], 5.0);
}

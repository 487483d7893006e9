//! `/productos` handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use tienda_core::ProductId;

use crate::Result;
use crate::schemas::{ProductoCreate, ProductoRead};
use crate::state::AppState;

/// `POST /productos`: add a generic, electronic or clothing product.
pub async fn create_product(
    State(state): State<AppState>,
    body: std::result::Result<Json<ProductoCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductoRead>)> {
    let Json(body) = body?;
    let product = state.store.add_product(body.into()).await?;
    Ok((StatusCode::CREATED, Json(ProductoRead::from(&product))))
}

/// `GET /productos`
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<ProductoRead>> {
    let products = state.store.list_products().await;
    Json(products.iter().map(ProductoRead::from).collect())
}

/// `GET /productos/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductoRead>> {
    let id: ProductId = id.parse()?;
    let product = state.store.get_product(id).await?;
    Ok(Json(ProductoRead::from(&product)))
}

/// `DELETE /productos/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id: ProductId = id.parse()?;
    state.store.remove_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

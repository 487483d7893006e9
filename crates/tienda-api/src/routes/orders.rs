//! `/pedidos` handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use tienda_core::UserId;

use crate::Result;
use crate::schemas::{PedidoCreate, PedidoRead};
use crate::state::AppState;

/// `POST /pedidos`: place an order.
///
/// The customer must exist and be a customer; every product must exist and
/// have enough stock. Nothing is decremented unless the whole order fits.
pub async fn create_order(
    State(state): State<AppState>,
    body: std::result::Result<Json<PedidoCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<PedidoRead>)> {
    let Json(body) = body?;
    let customer = UserId::from_uuid(body.id_cliente);
    let order = state.store.place_order(customer, &body.items()).await?;
    Ok((StatusCode::CREATED, Json(PedidoRead::from(&order))))
}

/// `GET /usuarios/{id}/pedidos`
pub async fn orders_for_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PedidoRead>>> {
    let id: UserId = id.parse()?;
    let orders = state.store.orders_for_customer(id).await?;
    Ok(Json(orders.iter().map(PedidoRead::from).collect()))
}

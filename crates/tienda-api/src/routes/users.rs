//! `/usuarios` handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use tienda_core::{UserId, UserKind};

use crate::Result;
use crate::schemas::{UsuarioCreate, UsuarioRead};
use crate::state::AppState;

/// `POST /usuarios`: register a customer or administrator.
pub async fn create_user(
    State(state): State<AppState>,
    body: std::result::Result<Json<UsuarioCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<UsuarioRead>)> {
    let Json(body) = body?;
    let kind: UserKind = body.tipo.parse()?;

    let user = state
        .store
        .register_user(kind, &body.nombre, &body.email, body.direccion_postal)
        .await?;

    Ok((StatusCode::CREATED, Json(UsuarioRead::from(&user))))
}

/// `GET /usuarios/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UsuarioRead>> {
    let id: UserId = id.parse()?;
    let user = state.store.get_user(id).await?;
    Ok(Json(UsuarioRead::from(&user)))
}

/// `GET /usuarios`
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UsuarioRead>> {
    let users = state.store.list_users().await;
    Json(users.iter().map(UsuarioRead::from).collect())
}

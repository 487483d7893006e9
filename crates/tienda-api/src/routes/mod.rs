//! Route table.
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | GET | `/health` | no |
//! | POST | `/usuarios` | no |
//! | GET | `/usuarios` | no |
//! | GET | `/usuarios/{id}` | no |
//! | GET | `/usuarios/{id}/pedidos` | no |
//! | GET | `/productos` | no |
//! | GET | `/productos/{id}` | no |
//! | POST | `/productos` | when enabled |
//! | DELETE | `/productos/{id}` | when enabled |
//! | POST | `/pedidos` | when enabled |
//! | POST | `/auth/register` | no |
//! | POST | `/auth/token` | no |
//! | GET | `/auth/me` | always |
//! | GET | `/auth/accounts` | always |

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

use tienda_auth::{AuthConfig, AuthLayer, JwtValidator};

use crate::state::AppState;

/// Build the full application router.
///
/// Catalogue and order writes go through the bearer-token layer only when
/// `auth.enabled` is set. Account introspection routes always require a
/// token.
pub fn router(state: AppState, auth: &AuthConfig) -> Router {
    let validator = Arc::new(JwtValidator::new(state.tokens.clone()));

    let public = Router::new()
        .route("/health", get(health::health))
        .route("/usuarios", get(users::list_users).post(users::create_user))
        .route("/usuarios/{id}", get(users::get_user))
        .route("/usuarios/{id}/pedidos", get(orders::orders_for_customer))
        .route("/productos", get(products::list_products))
        .route("/productos/{id}", get(products::get_product))
        .route("/auth/register", post(auth::register))
        .route("/auth/token", post(auth::login));

    let writes = Router::new()
        .route("/productos", post(products::create_product))
        .route("/productos/{id}", delete(products::delete_product))
        .route("/pedidos", post(orders::create_order))
        .route_layer(AuthLayer::new(validator.clone(), auth.clone()));

    let always_on = AuthConfig {
        enabled: true,
        ..auth.clone()
    };
    let accounts = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/accounts", get(auth::list_accounts))
        .route_layer(AuthLayer::new(validator, always_on));

    Router::new()
        .merge(public)
        .merge(writes)
        .merge(accounts)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

//! `/auth` handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use tienda_auth::{AuthError, AuthenticatedUser};

use crate::schemas::{AccountRead, LoginRequest, RegisterRequest, TokenResponse};
use crate::state::AppState;
use crate::{Error, Result};

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountRead>)> {
    let Json(body) = body?;
    let account = state
        .accounts
        .create_account(&body.username, &body.email, &body.password)
        .await?;
    Ok((StatusCode::CREATED, Json(AccountRead::from(&account))))
}

/// `POST /auth/token`: exchange credentials for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let Json(body) = body?;
    let account = state
        .accounts
        .authenticate(&body.username, &body.password)
        .await
        .ok_or(AuthError::InvalidCredentials)?;

    let access_token = state.tokens.issue(&account, None)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.tokens.ttl().as_secs(),
    }))
}

/// `GET /auth/me`: the account behind the bearer token.
pub async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<AccountRead>> {
    let account = state
        .accounts
        .get_by_username(&user.subject)
        .ok_or_else(|| Error::UnknownAccount(user.subject.clone()))?;
    Ok(Json(AccountRead::from(&account)))
}

/// `GET /auth/accounts`
pub async fn list_accounts(State(state): State<AppState>) -> Json<Vec<AccountRead>> {
    Json(
        state
            .accounts
            .list_accounts()
            .iter()
            .map(AccountRead::from)
            .collect(),
    )
}

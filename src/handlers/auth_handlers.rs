//! `POST /login` — trades a username and role for a bearer token.

use crate::{
    auth::gate::is_known_role,
    errors::AppError,
    models::auth::{LoginRequest, TokenResponse},
    routes::routes::AppState,
    services::token_service::TOKEN_TTL_SECS,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::info;

/// Issue a token for the supplied identity.
///
/// The role must be given explicitly and be one of the known roles; it is
/// never defaulted.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(body) = payload?;
    let username = body
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::bad_request("Username required"))?;
    let role = body
        .role
        .as_deref()
        .ok_or_else(|| AppError::bad_request("Role required"))?;
    if !is_known_role(role) {
        return Err(AppError::bad_request("Unknown role"));
    }

    let token = state.tokens.issue(username, role)?;
    info!("issued {} token for {}", role, username);

    Ok(Json(TokenResponse {
        token,
        token_type: "Bearer",
        expires_in: TOKEN_TTL_SECS,
    }))
}

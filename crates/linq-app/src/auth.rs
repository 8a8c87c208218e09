use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use linq_core::crypto::token::{sign_token, verify_token, Claims};

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_USERNAME: &str = "defaultUser";

pub async fn require_token(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    // "Bearer <token>": the token is whatever follows the first space.
    let token = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(' ').nth(1))
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let Some(token) = token else {
        return ApiError::Unauthorized("No token provided").into_response();
    };

    let claims = match verify_token(&state.token_secret, &token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "token rejected");
            return ApiError::Forbidden("Invalid or expired token").into_response();
        }
    };

    req.extensions_mut().insert(claims);

    next.run(req).await
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Option<Json<LoginRequest>>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = body
        .and_then(|Json(b)| b.username)
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

    let token = sign_token(&state.token_secret, &username, state.token_ttl_secs)
        .map_err(anyhow::Error::from)?;

    tracing::info!(user = %username, "issued token");

    Ok(Json(LoginResponse { token }))
}

#[derive(Serialize)]
pub struct ProtectedResponse {
    pub message: &'static str,
    pub user: Claims,
}

pub async fn protected(Extension(claims): Extension<Claims>) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "This is a protected route",
        user: claims,
    })
}

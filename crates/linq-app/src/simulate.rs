use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::retry::call_with_retry;
use crate::state::AppState;
use crate::upstream::UpstreamPayload;

#[derive(Serialize)]
pub struct SimulateResponse {
    pub message: &'static str,
    pub result: UpstreamPayload,
}

pub async fn simulate_upstream(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let result = call_with_retry(
        state.upstream.as_ref(),
        state.sleeper.as_ref(),
        &state.upstream_retry,
    )
    .await?;

    Ok(Json(SimulateResponse {
        message: "Upstream request succeeded.",
        result,
    }))
}

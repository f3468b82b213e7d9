//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
    /// Aliases with an open session, sorted.
    pub aliases: Vec<String>,
    pub version: String,
}

/// Health check endpoint.
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let aliases = state.registry.aliases().await;
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        sessions: aliases.len(),
        aliases,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

//! Session endpoints: opening, closing, saving and restoring backends.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use resman_core::error::ResmanError;
use resman_core::session::SessionDescriptor;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body naming only the target session.
#[derive(Debug, Deserialize)]
pub struct AliasRequest {
    pub alias: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateMongoRequest {
    pub alias: String,
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateJsonRequest {
    pub alias: String,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct LoadSessionRequest {
    pub alias: String,
    /// A descriptor previously returned by `/saveSession`.
    pub session: Value,
}

/// Response for a session that was opened.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub alias: String,
    pub session: SessionDescriptor,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub status: String,
}

/// Connect to a MongoDB collection and register it.
/// POST /validateMongoDB
pub async fn validate_mongodb(
    State(state): State<AppState>,
    Json(request): Json<ValidateMongoRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let descriptor = SessionDescriptor::mongodb(request.uri, request.database, request.collection);
    let session = state.open_session(&request.alias, &descriptor).await?;
    Ok(Json(SessionResponse {
        alias: request.alias,
        session,
    }))
}

/// Open a JSON resource file and register it.
/// POST /validateJSON
pub async fn validate_json(
    State(state): State<AppState>,
    Json(request): Json<ValidateJsonRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let descriptor = SessionDescriptor::json(request.filename.clone());
    let session = state
        .open_session(&request.alias, &descriptor)
        .await
        .map_err(|e| match e {
            ResmanError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                ApiError::not_found(format!("Resource file '{}' does not exist", request.filename))
            }
            other => other.into(),
        })?;
    Ok(Json(SessionResponse {
        alias: request.alias,
        session,
    }))
}

/// Close a session.
/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<AliasRequest>,
) -> ApiResult<Json<LogoutResponse>> {
    state.registry.logout(&request.alias).await?;
    Ok(Json(LogoutResponse {
        status: "Logged out".to_string(),
    }))
}

/// Describe a session so it can be restored later.
/// POST /saveSession
pub async fn save_session(
    State(state): State<AppState>,
    Json(request): Json<AliasRequest>,
) -> ApiResult<Json<SessionDescriptor>> {
    Ok(Json(state.registry.save(&request.alias).await?))
}

/// Rebuild a backend from a saved descriptor and register it.
/// POST /loadSession
pub async fn load_session(
    State(state): State<AppState>,
    Json(request): Json<LoadSessionRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let descriptor = SessionDescriptor::from_value(request.session)?;
    let session = state.open_session(&request.alias, &descriptor).await?;
    info!(alias = %request.alias, client = session.client(), "Session restored");
    Ok(Json(SessionResponse {
        alias: request.alias,
        session,
    }))
}

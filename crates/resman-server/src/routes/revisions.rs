//! Undo/redo endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use resman_core::history::StackEntry;
use resman_core::traits::ResourceClient;
use resman_core::types::{RevisionStatus, Status};

use crate::error::ApiResult;
use crate::routes::session::AliasRequest;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddToStackRequest {
    pub alias: String,
    pub operation: String,
    /// The record for insert/delete, `{original_resource, resource}` for update.
    pub resource: Value,
}

/// Record a mutation the caller has just performed.
/// POST /addToStack
pub async fn add_to_stack(
    State(state): State<AppState>,
    Json(request): Json<AddToStackRequest>,
) -> ApiResult<Json<Status>> {
    let entry = StackEntry::from_value(json!({
        "operation": request.operation,
        "resource": request.resource,
    }))?;
    let client = state.client(&request.alias).await?;
    Ok(Json(client.add_to_stack(entry).await))
}

/// POST /undo
pub async fn undo(
    State(state): State<AppState>,
    Json(request): Json<AliasRequest>,
) -> ApiResult<Json<Status>> {
    let client = state.client(&request.alias).await?;
    Ok(Json(client.undo_operation().await?))
}

/// POST /redo
pub async fn redo(
    State(state): State<AppState>,
    Json(request): Json<AliasRequest>,
) -> ApiResult<Json<Status>> {
    let client = state.client(&request.alias).await?;
    Ok(Json(client.redo_operation().await?))
}

/// Which of the undo/redo stacks are empty.
/// POST /getRevisionStatus
pub async fn revision_status(
    State(state): State<AppState>,
    Json(request): Json<AliasRequest>,
) -> ApiResult<Json<RevisionStatus>> {
    let client = state.client(&request.alias).await?;
    Ok(Json(client.get_revision_status().await))
}

//! Resource lookup and mutation endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use resman_core::traits::ResourceClient;
use resman_core::types::{
    Existence, Resource, ResourceKey, ResourceQuery, Status, UpdateRequest, VersionEntry,
};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FindRequest {
    pub alias: String,
    #[serde(flatten)]
    pub query: ResourceQuery,
}

#[derive(Debug, Deserialize)]
pub struct VersionsRequest {
    pub alias: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub alias: String,
    #[serde(flatten)]
    pub key: ResourceKey,
}

/// Body carrying one full record.
#[derive(Debug, Deserialize)]
pub struct ResourceRequest {
    pub alias: String,
    pub resource: Resource,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub alias: String,
    #[serde(flatten)]
    pub update: UpdateRequest,
}

/// Find the latest or an exact version of a resource.
/// POST /find
///
/// Responds with the record itself, or `{"exists": false}`.
pub async fn find(
    State(state): State<AppState>,
    Json(request): Json<FindRequest>,
) -> ApiResult<Json<Value>> {
    let client = state.client(&request.alias).await?;
    let found = client.find_resource(&request.query).await?;
    Ok(Json(match found {
        Some(resource) => resource.into_value(),
        None => json!({ "exists": false }),
    }))
}

/// List every version of a resource, highest first.
/// POST /versions
pub async fn versions(
    State(state): State<AppState>,
    Json(request): Json<VersionsRequest>,
) -> ApiResult<Json<Vec<VersionEntry>>> {
    let client = state.client(&request.alias).await?;
    Ok(Json(client.get_versions(&request.id).await?))
}

/// POST /checkExists
pub async fn check_exists(
    State(state): State<AppState>,
    Json(request): Json<KeyRequest>,
) -> ApiResult<Json<Existence>> {
    let client = state.client(&request.alias).await?;
    Ok(Json(client.check_resource_exists(&request.key).await?.into()))
}

/// POST /insert
pub async fn insert(
    State(state): State<AppState>,
    Json(request): Json<ResourceRequest>,
) -> ApiResult<Json<Status>> {
    let client = state.client(&request.alias).await?;
    Ok(Json(client.insert_resource(request.resource).await?))
}

/// POST /update
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateBody>,
) -> ApiResult<Json<Status>> {
    let client = state.client(&request.alias).await?;
    Ok(Json(client.update_resource(request.update).await?))
}

/// Delete the record keyed by the body's `resource`.
/// POST /delete
pub async fn delete(
    State(state): State<AppState>,
    Json(request): Json<ResourceRequest>,
) -> ApiResult<Json<Status>> {
    let key = request.resource.key()?;
    let client = state.client(&request.alias).await?;
    Ok(Json(client.delete_resource(&key).await?))
}

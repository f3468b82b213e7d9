//! MongoDB collection backups to and from JSON resource files.
//!
//! These routes connect on their own and never register a session. File
//! names are resolved against the configured JSON directory.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use resman_stores::file::resolve_json_path;
use resman_stores::ClientFactory;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BackupRequest {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct BackupResponse {
    pub status: String,
    pub records: usize,
}

/// Write every record of a collection to a JSON resource file.
/// POST /backupMongoDB
pub async fn backup_mongodb(
    State(state): State<AppState>,
    Json(request): Json<BackupRequest>,
) -> ApiResult<Json<BackupResponse>> {
    let store = &state.config.store;
    let path = resolve_json_path(&store.json_dir, &request.filename)?;
    let client = ClientFactory::mongodb(&request.uri, &request.database, &request.collection, store).await?;

    let records = client.backup_to_file(&path).await?;
    info!(collection = %request.collection, file = %request.filename, records, "Collection backed up");
    Ok(Json(BackupResponse {
        status: "Backed up".to_string(),
        records,
    }))
}

/// Replace a collection with the records of a JSON resource file.
/// POST /restoreMongoDB
pub async fn restore_mongodb(
    State(state): State<AppState>,
    Json(request): Json<BackupRequest>,
) -> ApiResult<Json<BackupResponse>> {
    let store = &state.config.store;
    let path = resolve_json_path(&store.json_dir, &request.filename)?;
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(ApiError::not_found(format!(
            "Backup file '{}' does not exist",
            request.filename
        )));
    }
    let client = ClientFactory::mongodb(&request.uri, &request.database, &request.collection, store).await?;

    let records = client.restore_from_file(&path).await?;
    info!(collection = %request.collection, file = %request.filename, records, "Collection restored");
    Ok(Json(BackupResponse {
        status: "Restored".to_string(),
        records,
    }))
}

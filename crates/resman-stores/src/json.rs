//! Flat-file backend over a single JSON array.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use resman_core::error::ResmanResult;
use resman_core::history::{RevisionHistory, DEFAULT_HISTORY_LIMIT};
use resman_core::session::SessionDescriptor;
use resman_core::traits::ResourceClient;
use resman_core::types::{
    sort_versions_descending, Resource, ResourceKey, ResourceQuery, Status,
    UpdateRequest, VersionEntry,
};

use crate::file::{read_resources, write_resources};

/// Resource client backed by one JSON file.
///
/// The whole file is loaded at construction and kept in memory. Every
/// mutation rewrites the file in full before the in-memory list changes, so
/// a failed write leaves both untouched.
pub struct JsonResourceClient {
    path: PathBuf,
    resources: RwLock<Vec<Resource>>,
    history: Mutex<RevisionHistory>,
}

impl JsonResourceClient {
    /// Load an existing resource file.
    pub async fn open(path: impl Into<PathBuf>) -> ResmanResult<Self> {
        Self::open_with_limit(path, DEFAULT_HISTORY_LIMIT).await
    }

    /// Load an existing resource file with a custom undo limit.
    pub async fn open_with_limit(path: impl Into<PathBuf>, history_limit: usize) -> ResmanResult<Self> {
        let path = path.into();
        let resources = read_resources(&path).await?;
        info!(path = %path.display(), records = resources.len(), "Opened JSON resource file");
        Ok(Self {
            path,
            resources: RwLock::new(resources),
            history: Mutex::new(RevisionHistory::new(history_limit)),
        })
    }

    /// Load a resource file, creating it empty when it does not exist yet.
    pub async fn create(path: impl Into<PathBuf>) -> ResmanResult<Self> {
        Self::create_with_limit(path, DEFAULT_HISTORY_LIMIT).await
    }

    pub async fn create_with_limit(path: impl Into<PathBuf>, history_limit: usize) -> ResmanResult<Self> {
        let path = path.into();
        if !tokio::fs::try_exists(&path).await? {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            write_resources(&path, &[]).await?;
            info!(path = %path.display(), "Created empty JSON resource file");
        }
        Self::open_with_limit(path, history_limit).await
    }

    /// Snapshot of every stored record, in file order.
    pub async fn resources(&self) -> Vec<Resource> {
        self.resources.read().await.clone()
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Persist `next` and make it the in-memory list.
    async fn commit(&self, guard: &mut Vec<Resource>, next: Vec<Resource>) -> ResmanResult<()> {
        write_resources(&self.path, &next).await?;
        *guard = next;
        Ok(())
    }
}

#[async_trait]
impl ResourceClient for JsonResourceClient {
    async fn find_resource(&self, query: &ResourceQuery) -> ResmanResult<Option<Resource>> {
        let resources = self.resources.read().await;
        let key = match query.pinned_key() {
            Some(key) => key,
            None => {
                let versions = resources
                    .iter()
                    .filter(|r| r.id() == Some(query.id.as_str()))
                    .filter_map(Resource::resource_version);
                match query.latest_key(versions) {
                    Some(key) => key,
                    None => {
                        debug!(id = %query.id, "No versions found");
                        return Ok(None);
                    }
                }
            }
        };
        debug!(id = %key.id, version = %key.resource_version, "Finding resource");
        Ok(resources.iter().find(|r| r.matches(&key)).cloned())
    }

    async fn get_versions(&self, id: &str) -> ResmanResult<Vec<VersionEntry>> {
        let mut versions: Vec<String> = self
            .resources
            .read()
            .await
            .iter()
            .filter(|r| r.id() == Some(id))
            .filter_map(|r| r.resource_version().map(str::to_string))
            .collect();
        sort_versions_descending(&mut versions);
        Ok(versions.into_iter().map(VersionEntry::new).collect())
    }

    async fn update_resource(&self, request: UpdateRequest) -> ResmanResult<Status> {
        if request.changes_identity()? {
            return Ok(Status::CannotChangeId);
        }
        let key = request.original_resource.key()?;
        let mut resources = self.resources.write().await;
        if !resources.iter().any(|r| r.matches(&key)) {
            return Ok(Status::DoesNotExist);
        }

        let mut next: Vec<Resource> = resources
            .iter()
            .filter(|r| !r.matches(&key))
            .cloned()
            .collect();
        next.push(request.resource);
        self.commit(&mut resources, next).await?;
        debug!(id = %key.id, version = %key.resource_version, "Updated resource");
        Ok(Status::Updated)
    }

    async fn check_resource_exists(&self, key: &ResourceKey) -> ResmanResult<bool> {
        Ok(self.resources.read().await.iter().any(|r| r.matches(key)))
    }

    async fn insert_resource(&self, resource: Resource) -> ResmanResult<Status> {
        let key = resource.key()?;
        let mut resources = self.resources.write().await;
        if resources.iter().any(|r| r.matches(&key)) {
            return Ok(Status::AlreadyExists);
        }
        let mut next = resources.clone();
        next.push(resource);
        self.commit(&mut resources, next).await?;
        debug!(id = %key.id, version = %key.resource_version, "Inserted resource");
        Ok(Status::Inserted)
    }

    async fn delete_resource(&self, key: &ResourceKey) -> ResmanResult<Status> {
        let mut resources = self.resources.write().await;
        let next: Vec<Resource> = resources
            .iter()
            .filter(|r| !r.matches(key))
            .cloned()
            .collect();
        self.commit(&mut resources, next).await?;
        debug!(id = %key.id, version = %key.resource_version, "Deleted resource");
        Ok(Status::Deleted)
    }

    fn save_session(&self) -> SessionDescriptor {
        SessionDescriptor::json(self.file_name())
    }

    fn history(&self) -> &Mutex<RevisionHistory> {
        &self.history
    }
}

//! In-memory client used by the unit tests of this crate.

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::error::ResmanResult;
use crate::history::RevisionHistory;
use crate::session::SessionDescriptor;
use crate::traits::ResourceClient;
use crate::types::{
    sort_versions_descending, Resource, ResourceKey, ResourceQuery, Status,
    UpdateRequest, VersionEntry,
};

#[derive(Default)]
pub(crate) struct MemoryClient {
    resources: RwLock<Vec<Resource>>,
    history: Mutex<RevisionHistory>,
}

#[async_trait]
impl ResourceClient for MemoryClient {
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
                    None => return Ok(None),
                }
            }
        };
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
        match resources.iter_mut().find(|r| r.matches(&key)) {
            Some(slot) => {
                *slot = request.resource;
                Ok(Status::Updated)
            }
            None => Ok(Status::DoesNotExist),
        }
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
        resources.push(resource);
        Ok(Status::Inserted)
    }

    async fn delete_resource(&self, key: &ResourceKey) -> ResmanResult<Status> {
        self.resources.write().await.retain(|r| !r.matches(key));
        Ok(Status::Deleted)
    }

    fn save_session(&self) -> SessionDescriptor {
        SessionDescriptor::json("memory.json")
    }

    fn history(&self) -> &Mutex<RevisionHistory> {
        &self.history
    }
}

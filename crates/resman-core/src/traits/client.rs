//! The resource client contract every storage backend implements.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::ResmanResult;
use crate::history::{RevisionHistory, StackEntry};
use crate::session::SessionDescriptor;
use crate::types::{
    Resource, ResourceKey, ResourceQuery, RevisionStatus, Status, UpdateRequest, VersionEntry,
};

/// Core ResourceClient trait - MongoDB and flat-file backends implement this.
///
/// Backends supply the seven store operations plus access to their private
/// [`RevisionHistory`]; undo/redo is provided on top of those operations and
/// behaves identically for every backend.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Find one record.
    ///
    /// Without a pinned version this is the record of `query.id` with the
    /// numerically highest `resource_version`. Returns `None` when nothing
    /// matches.
    async fn find_resource(&self, query: &ResourceQuery) -> ResmanResult<Option<Resource>>;

    /// All versions of `id`, highest first.
    async fn get_versions(&self, id: &str) -> ResmanResult<Vec<VersionEntry>>;

    /// Replace the record keyed by `request.original_resource` with
    /// `request.resource`.
    ///
    /// Reports [`Status::CannotChangeId`] when the two records disagree on
    /// `id` or `resource_version`, and [`Status::DoesNotExist`] when no stored
    /// record matches.
    async fn update_resource(&self, request: UpdateRequest) -> ResmanResult<Status>;

    /// Whether exactly this `(id, resource_version)` is stored.
    async fn check_resource_exists(&self, key: &ResourceKey) -> ResmanResult<bool>;

    /// Store a new record unless its key is taken.
    async fn insert_resource(&self, resource: Resource) -> ResmanResult<Status>;

    /// Remove the record with this key. Reports [`Status::Deleted`] even
    /// when nothing matched.
    async fn delete_resource(&self, key: &ResourceKey) -> ResmanResult<Status>;

    /// Describe this instance so it can be reconstructed later.
    fn save_session(&self) -> SessionDescriptor;

    /// The undo/redo stacks owned by this instance.
    fn history(&self) -> &Mutex<RevisionHistory>;

    /// Record a performed mutation so it can be undone.
    async fn add_to_stack(&self, entry: StackEntry) -> Status {
        debug!(operation = %entry.operation(), "Recording operation");
        self.history().lock().await.push(entry);
        Status::AddedToStack
    }

    /// Revert the most recent recorded mutation.
    async fn undo_operation(&self) -> ResmanResult<Status> {
        let Some(entry) = self.history().lock().await.pop_undo() else {
            return Ok(Status::NothingToUndo);
        };

        match entry.inverse().apply_to(self).await {
            Ok(outcome) => {
                if !outcome.is_applied() {
                    warn!(operation = %entry.operation(), outcome = %outcome, "Undo had no effect on the store");
                }
                self.history().lock().await.push_redo(entry);
                Ok(Status::Undone)
            }
            Err(err) => {
                self.history().lock().await.push_undo(entry);
                Err(err)
            }
        }
    }

    /// Re-apply the most recently undone mutation.
    async fn redo_operation(&self) -> ResmanResult<Status> {
        let Some(entry) = self.history().lock().await.pop_redo() else {
            return Ok(Status::NothingToRedo);
        };

        match entry.apply_to(self).await {
            Ok(outcome) => {
                if !outcome.is_applied() {
                    warn!(operation = %entry.operation(), outcome = %outcome, "Redo had no effect on the store");
                }
                self.history().lock().await.push_undo(entry);
                Ok(Status::Redone)
            }
            Err(err) => {
                self.history().lock().await.push_redo(entry);
                Err(err)
            }
        }
    }

    /// Which of the undo/redo stacks are empty.
    async fn get_revision_status(&self) -> RevisionStatus {
        self.history().lock().await.status()
    }
}

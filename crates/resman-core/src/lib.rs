//! resman-core - Core library for resman.
//!
//! This crate provides the resource record model, the [`ResourceClient`]
//! contract every storage backend implements, the undo/redo engine shared by
//! all backends, and the alias-keyed session registry.
//!
//! # Example
//!
//! ```ignore
//! use resman_core::{ResourceClient, ResourceQuery, StackEntry};
//!
//! let status = client.insert_resource(resource.clone()).await?;
//! client.add_to_stack(StackEntry::Insert(resource)).await;
//!
//! let latest = client.find_resource(&ResourceQuery::latest("kernel-example")).await?;
//! client.undo_operation().await?;
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod session;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{ManagerConfig, ServerConfig, StoreConfig};
pub use error::{ErrorCode, ResmanError, ResmanResult};
pub use history::{Operation, RevisionHistory, StackEntry, DEFAULT_HISTORY_LIMIT};
pub use session::{SessionDescriptor, SessionRegistry};
pub use traits::ResourceClient;
pub use types::{
    Existence, Resource, ResourceKey, ResourceQuery, ResourceVersion, RevisionStatus, Status,
    UpdateRequest, VersionEntry,
};

//! resman-stores - Storage backends for resman.
//!
//! # Supported Backends
//!
//! - **JSON file** - one pretty-printed JSON array, rewritten on every mutation
//! - **MongoDB** (feature: `mongodb`) - one collection of resource documents

mod factory;
pub mod file;
mod json;

#[cfg(feature = "mongodb")]
mod mongo;

// Public exports
pub use factory::ClientFactory;
pub use json::JsonResourceClient;

#[cfg(feature = "mongodb")]
pub use mongo::MongoResourceClient;

// Re-export core types for convenience
pub use resman_core::traits::ResourceClient;

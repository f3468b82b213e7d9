//! Core types for resman.

mod resource;
mod status;
mod version;

pub use resource::*;
pub use status::{RevisionStatus, Status};
pub use version::{latest_version, sort_versions_descending, ResourceVersion};

//! Login sessions: backend descriptors and the alias registry.

mod descriptor;
mod registry;

pub use descriptor::SessionDescriptor;
pub use registry::SessionRegistry;

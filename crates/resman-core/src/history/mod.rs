//! Session-scoped undo/redo of mutating operations.
//!
//! The request layer pushes a [`StackEntry`] after every successful insert,
//! update or delete. Undo replays the inverse of the newest entry against the
//! same backend; redo replays the entry itself. The engine is generic over
//! backends and is driven through the provided methods of
//! [`ResourceClient`](crate::traits::ResourceClient).

mod entry;
mod stack;

pub use entry::{Operation, StackEntry};
pub use stack::{RevisionHistory, DEFAULT_HISTORY_LIMIT};

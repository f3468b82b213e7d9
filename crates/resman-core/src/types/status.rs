//! Status outcomes of mutating and revision operations.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Outcome reported by insert, update, delete, undo and redo.
///
/// Serializes as `{"status": "<message>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Inserted,
    AlreadyExists,
    Updated,
    DoesNotExist,
    CannotChangeId,
    Deleted,
    AddedToStack,
    Undone,
    NothingToUndo,
    Redone,
    NothingToRedo,
}

impl Status {
    /// The message carried on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inserted => "Inserted",
            Self::AlreadyExists => "Resource already exists",
            Self::Updated => "Updated",
            Self::DoesNotExist => "Resource does not exist",
            Self::CannotChangeId => "Cannot change resource id",
            Self::Deleted => "Deleted",
            Self::AddedToStack => "Added to stack",
            Self::Undone => "Undone",
            Self::NothingToUndo => "Nothing to undo",
            Self::Redone => "Redone",
            Self::NothingToRedo => "No operations to redo",
        }
    }

    /// Whether the operation changed the store or the history.
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            Self::Inserted
                | Self::Updated
                | Self::Deleted
                | Self::AddedToStack
                | Self::Undone
                | Self::Redone
        )
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_struct("Status", 1)?;
        body.serialize_field("status", self.as_str())?;
        body.end()
    }
}

/// Emptiness of the undo and redo stacks, `1` meaning empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevisionStatus {
    pub undo: u8,
    pub redo: u8,
}

impl RevisionStatus {
    pub fn new(undo_empty: bool, redo_empty: bool) -> Self {
        Self {
            undo: u8::from(undo_empty),
            redo: u8::from(redo_empty),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo == 0
    }

    pub fn can_redo(&self) -> bool {
        self.redo == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_value(Status::AlreadyExists).unwrap(),
            json!({"status": "Resource already exists"})
        );
        assert_eq!(
            serde_json::to_value(Status::NothingToRedo).unwrap(),
            json!({"status": "No operations to redo"})
        );
    }

    #[test]
    fn test_revision_status() {
        let status = RevisionStatus::new(true, false);
        assert_eq!(serde_json::to_value(status).unwrap(), json!({"undo": 1, "redo": 0}));
        assert!(!status.can_undo());
        assert!(status.can_redo());
    }
}

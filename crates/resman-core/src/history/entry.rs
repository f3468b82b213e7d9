//! Reversible operation records kept on the undo/redo stacks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::{ResmanError, ResmanResult};
use crate::traits::ResourceClient;
use crate::types::{Resource, Status, UpdateRequest};

/// Mutating operation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Insert,
    Delete,
    Update,
}

/// One reversible mutation.
///
/// On the wire an entry is `{"operation": "...", "resource": ...}`; for
/// updates `resource` holds `{"original_resource", "resource"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEntry", into = "RawEntry")]
pub enum StackEntry {
    Insert(Resource),
    Delete(Resource),
    Update(UpdateRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEntry {
    operation: String,
    resource: Value,
}

impl StackEntry {
    /// Decode an entry supplied by the request layer.
    ///
    /// An operation tag other than insert, delete or update yields
    /// [`ResmanError::InvalidOperation`].
    pub fn from_value(value: Value) -> ResmanResult<Self> {
        let raw: RawEntry = serde_json::from_value(value)?;
        Self::try_from(raw)
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Insert(_) => Operation::Insert,
            Self::Delete(_) => Operation::Delete,
            Self::Update(_) => Operation::Update,
        }
    }

    /// The entry that undoes this one.
    pub fn inverse(&self) -> Self {
        match self {
            Self::Insert(resource) => Self::Delete(resource.clone()),
            Self::Delete(resource) => Self::Insert(resource.clone()),
            Self::Update(update) => Self::Update(update.inverted()),
        }
    }

    /// Perform this mutation against a backend.
    pub async fn apply_to<C>(&self, client: &C) -> ResmanResult<Status>
    where
        C: ResourceClient + ?Sized,
    {
        match self {
            Self::Insert(resource) => client.insert_resource(resource.clone()).await,
            Self::Delete(resource) => client.delete_resource(&resource.key()?).await,
            Self::Update(update) => client.update_resource(update.clone()).await,
        }
    }
}

impl TryFrom<RawEntry> for StackEntry {
    type Error = ResmanError;

    fn try_from(raw: RawEntry) -> ResmanResult<Self> {
        let operation = Operation::from_str(&raw.operation)
            .map_err(|_| ResmanError::invalid_operation(raw.operation.clone()))?;
        Ok(match operation {
            Operation::Insert => Self::Insert(Resource::from_value(raw.resource)?),
            Operation::Delete => Self::Delete(Resource::from_value(raw.resource)?),
            Operation::Update => Self::Update(serde_json::from_value(raw.resource)?),
        })
    }
}

impl From<StackEntry> for RawEntry {
    fn from(entry: StackEntry) -> Self {
        let operation = entry.operation().to_string();
        let resource = match entry {
            StackEntry::Insert(resource) | StackEntry::Delete(resource) => resource.into_value(),
            StackEntry::Update(update) => serde_json::json!({
                "original_resource": update.original_resource,
                "resource": update.resource,
            }),
        };
        Self { operation, resource }
    }
}

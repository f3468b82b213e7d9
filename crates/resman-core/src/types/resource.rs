//! Resource records and the query shapes that address them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::version::latest_version;
use crate::error::{ResmanError, ResmanResult};

/// Field holding the logical identity of a resource.
pub const ID_FIELD: &str = "id";
/// Field holding the dotted version tag of a resource.
pub const VERSION_FIELD: &str = "resource_version";
/// Version selector meaning "the highest version".
pub const LATEST_VERSION: &str = "Latest";

/// A resource metadata record.
///
/// The record is an open JSON object. Only `id` and `resource_version` are
/// interpreted; every other field passes through untouched and in order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Map<String, Value>);

impl Resource {
    /// Create a record from its fields.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Create a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> ResmanResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(ResmanError::validation(format!(
                "resource must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// The `id` field, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.get_str(ID_FIELD)
    }

    /// The `resource_version` field, if present and a string.
    pub fn resource_version(&self) -> Option<&str> {
        self.get_str(VERSION_FIELD)
    }

    /// Extract the `(id, resource_version)` identity of this record.
    pub fn key(&self) -> ResmanResult<ResourceKey> {
        let id = self.id().ok_or_else(|| ResmanError::missing_field(ID_FIELD))?;
        let version = self
            .resource_version()
            .ok_or_else(|| ResmanError::missing_field(VERSION_FIELD))?;
        Ok(ResourceKey::new(id, version))
    }

    /// Whether this record has exactly the given identity.
    pub fn matches(&self, key: &ResourceKey) -> bool {
        self.id() == Some(key.id.as_str())
            && self.resource_version() == Some(key.resource_version.as_str())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Resource {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for Resource {
    type Error = ResmanError;

    fn try_from(value: Value) -> ResmanResult<Self> {
        Self::from_value(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The unique identity of one resource version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub id: String,
    pub resource_version: String,
}

impl ResourceKey {
    pub fn new(id: impl Into<String>, resource_version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_version: resource_version.into(),
        }
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.resource_version)
    }
}

/// Lookup by id with an optional version selector.
///
/// An absent, empty or `"Latest"` version selects the highest version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceQuery {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
}

impl ResourceQuery {
    /// Query for the latest version of `id`.
    pub fn latest(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_version: None,
        }
    }

    /// Query for one exact version of `id`.
    pub fn exact(id: impl Into<String>, resource_version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_version: Some(resource_version.into()),
        }
    }

    /// The exact version requested, or `None` when the latest is wanted.
    pub fn pinned_version(&self) -> Option<&str> {
        match self.resource_version.as_deref() {
            None | Some("") | Some(LATEST_VERSION) => None,
            Some(version) => Some(version),
        }
    }

    /// The exact key requested, or `None` when the latest is wanted.
    pub fn pinned_key(&self) -> Option<ResourceKey> {
        self.pinned_version()
            .map(|version| ResourceKey::new(self.id.clone(), version))
    }

    /// The key of the highest of `versions` stored under this query's id.
    ///
    /// Ignores any pinned version; `None` when `versions` is empty.
    pub fn latest_key<'a, I>(&self, versions: I) -> Option<ResourceKey>
    where
        I: IntoIterator<Item = &'a str>,
    {
        latest_version(versions).map(|version| ResourceKey::new(self.id.clone(), version))
    }
}

impl From<ResourceKey> for ResourceQuery {
    fn from(key: ResourceKey) -> Self {
        Self::exact(key.id, key.resource_version)
    }
}

/// Replacement of one record by another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// The record as it is currently stored.
    pub original_resource: Resource,
    /// The record that replaces it.
    pub resource: Resource,
}

impl UpdateRequest {
    pub fn new(original_resource: Resource, resource: Resource) -> Self {
        Self {
            original_resource,
            resource,
        }
    }

    /// Whether applying this update would give the record a new identity.
    ///
    /// Either a changed `id` or a changed `resource_version` counts.
    pub fn changes_identity(&self) -> ResmanResult<bool> {
        let original = self.original_resource.key()?;
        let modified = self.resource.key()?;
        Ok(original.id != modified.id || original.resource_version != modified.resource_version)
    }

    /// The update that reverts this one.
    pub fn inverted(&self) -> Self {
        Self {
            original_resource: self.resource.clone(),
            resource: self.original_resource.clone(),
        }
    }
}

/// One element of a version listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub resource_version: String,
}

impl VersionEntry {
    pub fn new(resource_version: impl Into<String>) -> Self {
        Self {
            resource_version: resource_version.into(),
        }
    }
}

/// Boolean existence outcome, `{"exists": bool}` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Existence {
    pub exists: bool,
}

impl From<bool> for Existence {
    fn from(exists: bool) -> Self {
        Self { exists }
    }
}

//! Serializable description of a backend instance.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ResmanError, ResmanResult};

/// Enough information to reconstruct a backend instance later.
///
/// Tagged by `client` on the wire: `{"client": "mongodb", "uri", "database",
/// "collection"}` or `{"client": "json", "filename"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "client", rename_all = "lowercase")]
pub enum SessionDescriptor {
    Mongodb {
        uri: String,
        database: String,
        collection: String,
    },
    Json {
        filename: String,
    },
}

impl SessionDescriptor {
    pub fn mongodb(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self::Mongodb {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }

    pub fn json(filename: impl Into<String>) -> Self {
        Self::Json {
            filename: filename.into(),
        }
    }

    /// The backend type tag.
    pub fn client(&self) -> &'static str {
        match self {
            Self::Mongodb { .. } => "mongodb",
            Self::Json { .. } => "json",
        }
    }

    /// Decode a descriptor, reporting unknown client tags distinctly.
    pub fn from_value(value: Value) -> ResmanResult<Self> {
        match value.get("client").and_then(Value::as_str) {
            Some("mongodb") | Some("json") => Ok(serde_json::from_value(value)?),
            Some(other) => Err(ResmanError::UnsupportedClient {
                client: other.to_string(),
            }),
            None => Err(ResmanError::missing_field("client")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_descriptor_wire_shape() {
        let descriptor = SessionDescriptor::json("resources.json");
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({"client": "json", "filename": "resources.json"})
        );
    }

    #[test]
    fn test_mongodb_descriptor_round_trip() {
        let value = json!({
            "client": "mongodb",
            "uri": "mongodb://localhost:27017",
            "database": "gem5-vision",
            "collection": "resources"
        });
        let descriptor = SessionDescriptor::from_value(value).unwrap();
        assert_eq!(descriptor.client(), "mongodb");
        assert_eq!(
            descriptor,
            SessionDescriptor::mongodb("mongodb://localhost:27017", "gem5-vision", "resources")
        );
    }

    #[test]
    fn test_unknown_client() {
        let err = SessionDescriptor::from_value(json!({"client": "sqlite"})).unwrap_err();
        assert!(matches!(err, ResmanError::UnsupportedClient { .. }));
        assert!(SessionDescriptor::from_value(json!({"filename": "x.json"})).is_err());
    }
}

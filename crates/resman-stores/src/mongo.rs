//! MongoDB backend.

use std::path::Path;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use resman_core::config::StoreConfig;
use resman_core::error::{ErrorCode, ResmanError, ResmanResult};
use resman_core::history::RevisionHistory;
use resman_core::session::SessionDescriptor;
use resman_core::traits::ResourceClient;
use resman_core::types::{
    sort_versions_descending, Resource, ResourceKey, ResourceQuery, Status,
    UpdateRequest, VersionEntry, ID_FIELD, VERSION_FIELD,
};

use mongodb::{
    bson::{doc, Bson, Document},
    options::{ClientOptions, CountOptions, FindOneOptions, FindOptions},
    Client, Collection,
};

use crate::file::{read_resources, write_resources};

const MONGO_ID: &str = "_id";

/// Resource client over one MongoDB collection.
///
/// Construction validates the server, the database and the collection; once
/// built, every operation assumes the connection is good.
pub struct MongoResourceClient {
    uri: String,
    database: String,
    collection_name: String,
    collection: Collection<Document>,
    history: Mutex<RevisionHistory>,
}

impl MongoResourceClient {
    /// Connect with default store settings.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> ResmanResult<Self> {
        Self::connect_with_config(uri, database, collection, &StoreConfig::default()).await
    }

    /// Connect, then confirm that `database` and `collection` both exist.
    pub async fn connect_with_config(
        uri: &str,
        database: &str,
        collection: &str,
        config: &StoreConfig,
    ) -> ResmanResult<Self> {
        let mut client_options = ClientOptions::parse(uri).await.map_err(|e| {
            ResmanError::connection_with("Failed to parse MongoDB URI", ErrorCode::DbConnectionFailed, e)
        })?;
        client_options.app_name = Some(config.app_name.clone());

        let client = Client::with_options(client_options).map_err(|e| {
            ResmanError::connection_with("Failed to create MongoDB client", ErrorCode::DbConnectionFailed, e)
        })?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                ResmanError::connection_with("Could not reach MongoDB server", ErrorCode::DbConnectionFailed, e)
            })?;

        let databases = client.list_database_names(None, None).await.map_err(|e| {
            ResmanError::connection_with("Failed to list databases", ErrorCode::DbConnectionFailed, e)
        })?;
        if !databases.iter().any(|name| name == database) {
            return Err(ResmanError::Connection {
                message: "Database Does not Exist!".to_string(),
                code: ErrorCode::DbDatabaseNotFound,
                source: None,
            });
        }

        let db = client.database(database);
        let collections = db.list_collection_names(None).await.map_err(|e| {
            ResmanError::connection_with("Failed to list collections", ErrorCode::DbConnectionFailed, e)
        })?;
        if !collections.iter().any(|name| name == collection) {
            return Err(ResmanError::Connection {
                message: "Collection Does not Exist!".to_string(),
                code: ErrorCode::DbCollectionNotFound,
                source: None,
            });
        }

        info!(database = %database, collection = %collection, "Connected to MongoDB");

        Ok(Self {
            uri: uri.to_string(),
            database: database.to_string(),
            collection_name: collection.to_string(),
            collection: db.collection(collection),
            history: Mutex::new(RevisionHistory::new(config.history_limit)),
        })
    }

    /// Dump every record, without `_id`, to a JSON resource file.
    pub async fn backup_to_file(&self, path: &Path) -> ResmanResult<usize> {
        let options = FindOptions::builder().projection(doc! { MONGO_ID: 0 }).build();
        let mut cursor = self
            .collection
            .find(doc! {}, options)
            .await
            .map_err(|e| db_error("Failed to read collection", e))?;

        let mut records = Vec::new();
        while cursor.advance().await.map_err(|e| db_error("Cursor error", e))? {
            let document = cursor
                .deserialize_current()
                .map_err(|e| db_error("Failed to deserialize", e))?;
            records.push(resource_from_document(document));
        }

        write_resources(path, &records).await?;
        info!(path = %path.display(), records = records.len(), "Backed up collection");
        Ok(records.len())
    }

    /// Replace the whole collection with the records of a JSON resource file.
    ///
    /// Revision history is cleared since recorded entries no longer describe
    /// the collection.
    pub async fn restore_from_file(&self, path: &Path) -> ResmanResult<usize> {
        let records = read_resources(path).await?;
        let documents = records
            .into_iter()
            .map(|r| {
                r.key()?;
                Ok(document_from_resource(r))
            })
            .collect::<ResmanResult<Vec<Document>>>()?;

        self.collection
            .delete_many(doc! {}, None)
            .await
            .map_err(|e| db_error("Failed to clear collection", e))?;
        let count = documents.len();
        if !documents.is_empty() {
            self.collection
                .insert_many(documents, None)
                .await
                .map_err(|e| db_error("Failed to restore records", e))?;
        }
        self.history.lock().await.clear();

        info!(path = %path.display(), records = count, "Restored collection");
        Ok(count)
    }

    async fn fetch_versions(&self, id: &str) -> ResmanResult<Vec<String>> {
        let options = FindOptions::builder()
            .projection(doc! { VERSION_FIELD: 1, MONGO_ID: 0 })
            .build();
        let mut cursor = self
            .collection
            .find(doc! { ID_FIELD: id }, options)
            .await
            .map_err(|e| db_error("Failed to list versions", e))?;

        let mut versions = Vec::new();
        while cursor.advance().await.map_err(|e| db_error("Cursor error", e))? {
            let document = cursor
                .deserialize_current()
                .map_err(|e| db_error("Failed to deserialize", e))?;
            if let Ok(version) = document.get_str(VERSION_FIELD) {
                versions.push(version.to_string());
            }
        }
        Ok(versions)
    }
}

#[async_trait]
impl ResourceClient for MongoResourceClient {
    async fn find_resource(&self, query: &ResourceQuery) -> ResmanResult<Option<Resource>> {
        let key = match query.pinned_key() {
            Some(key) => key,
            None => {
                let versions = self.fetch_versions(&query.id).await?;
                match query.latest_key(versions.iter().map(String::as_str)) {
                    Some(key) => key,
                    None => {
                        debug!(id = %query.id, "No versions found");
                        return Ok(None);
                    }
                }
            }
        };

        debug!(id = %key.id, version = %key.resource_version, "Finding resource");
        let options = FindOneOptions::builder().projection(doc! { MONGO_ID: 0 }).build();
        let found = self
            .collection
            .find_one(key_filter(&key), options)
            .await
            .map_err(|e| db_error("Failed to find resource", e))?;
        Ok(found.map(resource_from_document))
    }

    async fn get_versions(&self, id: &str) -> ResmanResult<Vec<VersionEntry>> {
        let mut versions = self.fetch_versions(id).await?;
        sort_versions_descending(&mut versions);
        Ok(versions.into_iter().map(VersionEntry::new).collect())
    }

    async fn update_resource(&self, request: UpdateRequest) -> ResmanResult<Status> {
        if request.changes_identity()? {
            return Ok(Status::CannotChangeId);
        }
        let key = request.original_resource.key()?;
        let replacement = document_from_resource(request.resource);

        let result = self
            .collection
            .replace_one(key_filter(&key), replacement, None)
            .await
            .map_err(|e| db_error("Failed to update resource", e))?;

        let status = replace_outcome(result.matched_count);
        debug!(id = %key.id, version = %key.resource_version, status = %status, "Replaced resource");
        Ok(status)
    }

    async fn check_resource_exists(&self, key: &ResourceKey) -> ResmanResult<bool> {
        let options = CountOptions::builder().limit(1).build();
        let count = self
            .collection
            .count_documents(key_filter(key), options)
            .await
            .map_err(|e| db_error("Failed to count resources", e))?;
        Ok(count > 0)
    }

    async fn insert_resource(&self, resource: Resource) -> ResmanResult<Status> {
        let key = resource.key()?;
        if self.check_resource_exists(&key).await? {
            return Ok(Status::AlreadyExists);
        }

        match self
            .collection
            .insert_one(document_from_resource(resource), None)
            .await
        {
            Ok(_) => {
                debug!(id = %key.id, version = %key.resource_version, "Inserted resource");
                Ok(Status::Inserted)
            }
            Err(e) => {
                warn!(id = %key.id, version = %key.resource_version, error = %e, "Insert rejected");
                Ok(Status::AlreadyExists)
            }
        }
    }

    async fn delete_resource(&self, key: &ResourceKey) -> ResmanResult<Status> {
        self.collection
            .delete_one(key_filter(key), None)
            .await
            .map_err(|e| db_error("Failed to delete resource", e))?;
        debug!(id = %key.id, version = %key.resource_version, "Deleted resource");
        Ok(Status::Deleted)
    }

    fn save_session(&self) -> SessionDescriptor {
        SessionDescriptor::mongodb(&self.uri, &self.database, &self.collection_name)
    }

    fn history(&self) -> &Mutex<RevisionHistory> {
        &self.history
    }
}

fn key_filter(key: &ResourceKey) -> Document {
    doc! {
        ID_FIELD: key.id.as_str(),
        VERSION_FIELD: key.resource_version.as_str(),
    }
}

/// A replace that matched nothing means the original record is gone.
fn replace_outcome(matched_count: u64) -> Status {
    if matched_count == 0 {
        Status::DoesNotExist
    } else {
        Status::Updated
    }
}

fn db_error(context: &str, e: mongodb::error::Error) -> ResmanError {
    ResmanError::database(format!("{}: {}", context, e), e)
}

fn document_from_resource(resource: Resource) -> Document {
    let mut document: Document = resource
        .into_fields()
        .into_iter()
        .map(|(k, v)| (k, json_to_bson(v)))
        .collect();
    document.remove(MONGO_ID);
    document
}

fn resource_from_document(mut document: Document) -> Resource {
    document.remove(MONGO_ID);
    Resource::new(
        document
            .into_iter()
            .map(|(k, v)| (k, bson_to_json(v)))
            .collect(),
    )
}

fn json_to_bson(value: serde_json::Value) -> Bson {
    match value {
        serde_json::Value::Null => Bson::Null,
        serde_json::Value::Bool(b) => Bson::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Bson::Int64(i)
            } else if let Some(f) = n.as_f64() {
                Bson::Double(f)
            } else {
                Bson::Null
            }
        }
        serde_json::Value::String(s) => Bson::String(s),
        serde_json::Value::Array(arr) => Bson::Array(arr.into_iter().map(json_to_bson).collect()),
        serde_json::Value::Object(obj) => {
            Bson::Document(obj.into_iter().map(|(k, v)| (k, json_to_bson(v))).collect())
        }
    }
}

fn bson_to_json(value: Bson) -> serde_json::Value {
    match value {
        Bson::Null => serde_json::Value::Null,
        Bson::Boolean(b) => serde_json::Value::Bool(b),
        Bson::Int32(i) => serde_json::Value::Number(i.into()),
        Bson::Int64(i) => serde_json::Value::Number(i.into()),
        Bson::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Bson::String(s) => serde_json::Value::String(s),
        Bson::Array(arr) => serde_json::Value::Array(arr.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => {
            serde_json::Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
        }
        // ObjectId, dates and friends keep their extended JSON form.
        other => other.into_relaxed_extjson(),
    }
}

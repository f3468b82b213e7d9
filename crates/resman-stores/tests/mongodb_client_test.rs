//! Integration tests for MongoResourceClient.
//!
//! These tests require a running MongoDB instance with an existing
//! `resman_test` database holding a `resources` collection.
//! Set MONGO_URI environment variable to run these tests.
//!
//! Example:
//! ```bash
//! MONGO_URI="mongodb://localhost:27017" \
//!     cargo test -p resman-stores --features mongodb -- --ignored
//! ```

#![cfg(feature = "mongodb")]

use resman_core::error::{ErrorCode, ResmanError, ResmanResult};
use resman_core::history::StackEntry;
use resman_core::session::SessionDescriptor;
use resman_core::types::{
    Resource, ResourceKey, ResourceQuery, RevisionStatus, Status, UpdateRequest, VersionEntry,
};
use resman_core::ResourceClient;
use resman_stores::MongoResourceClient;
use serde_json::json;

const DATABASE: &str = "resman_test";
const COLLECTION: &str = "resources";

fn get_test_uri() -> Option<String> {
    std::env::var("MONGO_URI").ok()
}

fn resource(id: &str, version: &str) -> Resource {
    Resource::from_value(json!({
        "category": "binary",
        "id": id,
        "resource_version": version,
        "size": 1024,
    }))
    .unwrap()
}

async fn cleanup(client: &MongoResourceClient, id: &str) -> ResmanResult<()> {
    for entry in client.get_versions(id).await? {
        client
            .delete_resource(&ResourceKey::new(id, entry.resource_version))
            .await?;
    }
    Ok(())
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn test_missing_database_is_rejected() -> ResmanResult<()> {
    let uri = match get_test_uri() {
        Some(uri) => uri,
        None => return Ok(()), // Skip if no DB
    };

    let err = MongoResourceClient::connect(&uri, "resman_does_not_exist", COLLECTION)
        .await
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ResmanError::Connection { code: ErrorCode::DbDatabaseNotFound, .. }
    ));
    Ok(())
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn test_missing_collection_is_rejected() -> ResmanResult<()> {
    let uri = match get_test_uri() {
        Some(uri) => uri,
        None => return Ok(()),
    };

    let err = MongoResourceClient::connect(&uri, DATABASE, "resman_no_such_collection")
        .await
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ResmanError::Connection { code: ErrorCode::DbCollectionNotFound, .. }
    ));
    Ok(())
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn test_crud_and_latest() -> ResmanResult<()> {
    let uri = match get_test_uri() {
        Some(uri) => uri,
        None => return Ok(()),
    };
    let client = MongoResourceClient::connect(&uri, DATABASE, COLLECTION).await?;
    let id = "resman-it-crud";
    cleanup(&client, id).await?;

    for version in ["1.0.9", "1.0.10", "2.0.0"] {
        assert_eq!(client.insert_resource(resource(id, version)).await?, Status::Inserted);
    }
    assert_eq!(
        client.insert_resource(resource(id, "2.0.0")).await?,
        Status::AlreadyExists
    );

    assert_eq!(
        client.get_versions(id).await?,
        vec![VersionEntry::new("2.0.0"), VersionEntry::new("1.0.10"), VersionEntry::new("1.0.9")]
    );
    assert_eq!(
        client.find_resource(&ResourceQuery::latest(id)).await?,
        Some(resource(id, "2.0.0"))
    );

    let mut patched = resource(id, "1.0.9");
    patched.insert("size", 2048);
    let update = UpdateRequest::new(resource(id, "1.0.9"), patched.clone());
    assert_eq!(client.update_resource(update).await?, Status::Updated);
    assert_eq!(
        client.find_resource(&ResourceQuery::exact(id, "1.0.9")).await?,
        Some(patched)
    );

    let missing = UpdateRequest::new(resource(id, "3.0.0"), resource(id, "3.0.0"));
    assert_eq!(client.update_resource(missing).await?, Status::DoesNotExist);

    assert_eq!(
        client.delete_resource(&ResourceKey::new(id, "9.9.9")).await?,
        Status::Deleted
    );
    assert_eq!(client.get_versions(id).await?.len(), 3);

    cleanup(&client, id).await?;
    Ok(())
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn test_undo_delete_and_session() -> ResmanResult<()> {
    let uri = match get_test_uri() {
        Some(uri) => uri,
        None => return Ok(()),
    };
    let client = MongoResourceClient::connect(&uri, DATABASE, COLLECTION).await?;
    let id = "resman-it-undo";
    cleanup(&client, id).await?;

    let r = resource(id, "1.0.0");
    client.insert_resource(r.clone()).await?;
    client.delete_resource(&r.key()?).await?;
    client.add_to_stack(StackEntry::Delete(r.clone())).await;

    assert_eq!(client.undo_operation().await?, Status::Undone);
    assert!(client.check_resource_exists(&r.key()?).await?);

    assert_eq!(
        client.save_session(),
        SessionDescriptor::mongodb(&uri, DATABASE, COLLECTION)
    );

    cleanup(&client, id).await?;
    Ok(())
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn test_backup_and_restore_round_trip() -> ResmanResult<()> {
    let uri = match get_test_uri() {
        Some(uri) => uri,
        None => return Ok(()),
    };
    let client = MongoResourceClient::connect(&uri, DATABASE, COLLECTION).await?;
    let id = "resman-it-backup";
    cleanup(&client, id).await?;
    client.insert_resource(resource(id, "1.0.0")).await?;
    client.insert_resource(resource(id, "1.1.0")).await?;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");
    let backed_up = client.backup_to_file(&path).await?;
    assert!(backed_up >= 2);
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(!on_disk.contains("_id"));

    // Changes made after the backup disappear on restore.
    client.insert_resource(resource(id, "2.0.0")).await?;
    client.add_to_stack(StackEntry::Insert(resource(id, "2.0.0"))).await;
    assert_eq!(client.get_revision_status().await, RevisionStatus::new(false, true));

    let restored = client.restore_from_file(&path).await?;
    assert_eq!(restored, backed_up);
    assert_eq!(
        client.get_versions(id).await?,
        vec![VersionEntry::new("1.1.0"), VersionEntry::new("1.0.0")]
    );
    let latest = client.find_resource(&ResourceQuery::latest(id)).await?;
    assert_eq!(latest, Some(resource(id, "1.1.0")));
    assert_eq!(client.get_revision_status().await, RevisionStatus::new(true, true));

    cleanup(&client, id).await?;
    Ok(())
}

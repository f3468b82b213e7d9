//! Factory for building resource clients from session descriptors.

use std::sync::Arc;

use tracing::info;

use resman_core::config::StoreConfig;
use resman_core::error::{ResmanError, ResmanResult};
use resman_core::session::SessionDescriptor;
use resman_core::traits::ResourceClient;

use crate::file::resolve_json_path;
use crate::json::JsonResourceClient;

/// Factory for creating resource clients.
pub struct ClientFactory;

impl ClientFactory {
    /// Build the backend a descriptor describes.
    ///
    /// JSON file names are resolved against `config.json_dir`; the file must
    /// already exist.
    pub async fn create(
        descriptor: &SessionDescriptor,
        config: &StoreConfig,
    ) -> ResmanResult<Arc<dyn ResourceClient>> {
        info!(client = descriptor.client(), "Creating resource client");
        match descriptor {
            #[cfg(feature = "mongodb")]
            SessionDescriptor::Mongodb {
                uri,
                database,
                collection,
            } => {
                let client = Self::mongodb(uri, database, collection, config).await?;
                Ok(Arc::new(client))
            }

            SessionDescriptor::Json { filename } => {
                let client = Self::json(filename, config).await?;
                Ok(Arc::new(client))
            }

            #[allow(unreachable_patterns)]
            _ => Err(ResmanError::UnsupportedClient {
                client: descriptor.client().to_string(),
            }),
        }
    }

    /// Open a JSON resource file by name.
    pub async fn json(filename: &str, config: &StoreConfig) -> ResmanResult<JsonResourceClient> {
        let path = resolve_json_path(&config.json_dir, filename)?;
        JsonResourceClient::open_with_limit(path, config.history_limit).await
    }

    /// Connect to a MongoDB collection.
    #[cfg(feature = "mongodb")]
    pub async fn mongodb(
        uri: &str,
        database: &str,
        collection: &str,
        config: &StoreConfig,
    ) -> ResmanResult<crate::mongo::MongoResourceClient> {
        crate::mongo::MongoResourceClient::connect_with_config(uri, database, collection, config).await
    }
}

//! Server state management.

use std::sync::Arc;

use tracing::debug;

use resman_core::config::ManagerConfig;
use resman_core::error::ResmanResult;
use resman_core::session::{SessionDescriptor, SessionRegistry};
use resman_core::traits::ResourceClient;
use resman_stores::ClientFactory;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub config: Arc<ManagerConfig>,
}

impl AppState {
    /// Create a new application state with no open sessions.
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            config: Arc::new(config),
        }
    }

    /// The backend registered under `alias`.
    pub async fn client(&self, alias: &str) -> ResmanResult<Arc<dyn ResourceClient>> {
        debug!(alias = %alias, "Resolving session");
        self.registry.get(alias).await
    }

    /// Build the backend `descriptor` names and register it under `alias`.
    pub async fn open_session(
        &self,
        alias: &str,
        descriptor: &SessionDescriptor,
    ) -> ResmanResult<SessionDescriptor> {
        let client = ClientFactory::create(descriptor, &self.config.store).await?;
        let session = client.save_session();
        self.registry.login(alias, client).await;
        Ok(session)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

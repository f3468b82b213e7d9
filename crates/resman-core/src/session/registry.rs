//! Live backend instances keyed by caller-supplied alias.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::error::{ResmanError, ResmanResult};
use crate::session::SessionDescriptor;
use crate::traits::ResourceClient;

/// Registry of logged-in backend instances.
///
/// Each alias owns exactly one backend. Logging in replaces any instance
/// already held under the alias; logging out drops it.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<dyn ResourceClient>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend under `alias`, returning the one it replaced.
    pub async fn login(
        &self,
        alias: impl Into<String>,
        client: Arc<dyn ResourceClient>,
    ) -> Option<Arc<dyn ResourceClient>> {
        let alias = alias.into();
        info!(alias = %alias, client = client.save_session().client(), "Session opened");
        self.sessions.write().await.insert(alias, client)
    }

    /// Drop the backend registered under `alias`.
    pub async fn logout(&self, alias: &str) -> ResmanResult<()> {
        match self.sessions.write().await.remove(alias) {
            Some(_) => {
                info!(alias = %alias, "Session closed");
                Ok(())
            }
            None => Err(ResmanError::session_not_found(alias)),
        }
    }

    /// The backend registered under `alias`.
    pub async fn get(&self, alias: &str) -> ResmanResult<Arc<dyn ResourceClient>> {
        self.sessions
            .read()
            .await
            .get(alias)
            .cloned()
            .ok_or_else(|| ResmanError::session_not_found(alias))
    }

    pub async fn contains(&self, alias: &str) -> bool {
        self.sessions.read().await.contains_key(alias)
    }

    /// Registered aliases, sorted.
    pub async fn aliases(&self) -> Vec<String> {
        let mut aliases: Vec<String> = self.sessions.read().await.keys().cloned().collect();
        aliases.sort();
        aliases
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Describe the backend under `alias` so it can be restored later.
    pub async fn save(&self, alias: &str) -> ResmanResult<SessionDescriptor> {
        Ok(self.get(alias).await?.save_session())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryClient;

    #[tokio::test]
    async fn test_login_get_logout() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty().await);

        registry.login("local", Arc::new(MemoryClient::default())).await;
        assert!(registry.contains("local").await);
        assert_eq!(registry.save("local").await.unwrap(), SessionDescriptor::json("memory.json"));

        registry.logout("local").await.unwrap();
        assert!(!registry.contains("local").await);
        assert!(matches!(
            registry.get("local").await,
            Err(ResmanError::SessionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_login_replaces_existing_alias() {
        let registry = SessionRegistry::new();
        assert!(registry.login("a", Arc::new(MemoryClient::default())).await.is_none());
        assert!(registry.login("a", Arc::new(MemoryClient::default())).await.is_some());
        registry.login("b", Arc::new(MemoryClient::default())).await;
        assert_eq!(registry.aliases().await, vec!["a", "b"]);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_logout_unknown_alias() {
        let registry = SessionRegistry::new();
        assert!(registry.logout("missing").await.is_err());
    }
}

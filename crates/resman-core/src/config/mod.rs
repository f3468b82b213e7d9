//! Configuration system for resman.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ResmanError, ResmanResult};
use crate::history::DEFAULT_HISTORY_LIMIT;

/// Backend construction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory JSON resource files are resolved against.
    pub json_dir: PathBuf,
    /// Undo entries kept per backend instance.
    pub history_limit: usize,
    /// Application name reported to MongoDB.
    pub app_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            json_dir: PathBuf::from("database"),
            history_limit: DEFAULT_HISTORY_LIMIT,
            app_name: "resman".to_string(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// `host:port` listen address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Main resman configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
}

impl ManagerConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ResmanResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ResmanError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ResmanError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| ResmanError::Configuration(e.to_string())),
            _ => Err(ResmanError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> ResmanResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `RESMAN_*` environment variables on top of this configuration.
    pub fn with_env_overrides(mut self) -> ResmanResult<Self> {
        if let Ok(dir) = std::env::var("RESMAN_JSON_DIR") {
            self.store.json_dir = PathBuf::from(dir);
        }
        if let Ok(limit) = std::env::var("RESMAN_HISTORY_LIMIT") {
            self.store.history_limit = limit.parse().map_err(|_| {
                ResmanError::Configuration(format!("RESMAN_HISTORY_LIMIT must be a number, got '{}'", limit))
            })?;
        }
        if let Ok(host) = std::env::var("RESMAN_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("RESMAN_PORT") {
            self.server.port = port.parse().map_err(|_| {
                ResmanError::Configuration(format!("RESMAN_PORT must be a valid port number, got '{}'", port))
            })?;
        }
        Ok(self)
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> ManagerConfigBuilder {
        ManagerConfigBuilder::default()
    }
}

/// Builder for ManagerConfig.
#[derive(Default)]
pub struct ManagerConfigBuilder {
    config: ManagerConfig,
}

impl ManagerConfigBuilder {
    /// Set the directory JSON files are resolved against.
    pub fn json_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.store.json_dir = dir.into();
        self
    }

    /// Set the undo history limit.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.store.history_limit = limit;
        self
    }

    /// Set the listen address.
    pub fn listen(mut self, host: impl Into<String>, port: u16) -> Self {
        self.config.server.host = host.into();
        self.config.server.port = port;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ManagerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ManagerConfig::default();
        assert_eq!(config.store.json_dir, PathBuf::from("database"));
        assert_eq!(config.store.history_limit, 10);
        assert_eq!(config.server.address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_from_toml_file_fills_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[store]\njson_dir = \"/srv/resources\"\n\n[server]\nport = 8080").unwrap();

        let config = ManagerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.json_dir, PathBuf::from("/srv/resources"));
        assert_eq!(config.store.history_limit, 10);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "store:\n  history_limit: 3").unwrap();
        let config = ManagerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.history_limit, 3);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            ManagerConfig::from_file(file.path()),
            Err(ResmanError::Configuration(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = ManagerConfig::builder()
            .json_dir("fixtures")
            .history_limit(5)
            .listen("127.0.0.1", 5050)
            .build();
        assert_eq!(config.store.json_dir, PathBuf::from("fixtures"));
        assert_eq!(config.store.history_limit, 5);
        assert_eq!(config.server.address(), "127.0.0.1:5050");
    }
}

use super::error::ConfigError;
use super::STORE_URL_ENV;
use crate::domain::BlankPolicy;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_COLLECTION: &str = "agent";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Fully resolved application configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub rest: RestConfig,
    pub update: UpdateConfig,
}

impl AppConfig {
    /// Load configuration from file (defaults to `config/agentdesk.toml`)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }
}

/// Where agent records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub collection: String,
    /// JSON array of agents loaded into a `memory://` store at startup.
    pub seed: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            collection: DEFAULT_COLLECTION.to_string(),
            seed: None,
        }
    }
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self {
            url: Some("memory://".to_string()),
            ..Self::default()
        }
    }

    /// The connection string, or the startup error when none was configured.
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        self.url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingStoreUrl { env: STORE_URL_ENV })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    pub bind: String,
    pub cors_origins: Vec<String>,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl RestConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.parse().map_err(|_| ConfigError::InvalidBind {
            value: self.bind.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateConfig {
    pub blank_strings: BlankPolicy,
}

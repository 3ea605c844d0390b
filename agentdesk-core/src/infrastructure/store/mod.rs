//! Persistence gateway for agent records.
//!
//! Every backend implements [`AgentStore`]; the server holds one instance for
//! the lifetime of the process and shares it between requests.

mod memory;
#[cfg(feature = "redis-store")]
mod redis_store;

pub use memory::MemoryAgentStore;
#[cfg(feature = "redis-store")]
pub use redis_store::RedisAgentStore;

use crate::config::StoreConfig;
use crate::domain::Agent;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error("unsupported store url scheme in '{url}' (expected redis://, rediss:// or memory://)")]
    UnsupportedScheme { url: String },
    #[error("failed to connect to document store: {0}")]
    Connect(String),
    #[error("document store request failed: {0}")]
    Backend(String),
    #[error("stored agent document '{id}' is malformed: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode agent '{id}': {source}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("an agent with id '{id}' already exists")]
    DuplicateId { id: String },
    #[error("failed to read seed file {path:?}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("seed file {path:?} is not a JSON array of agents: {source}")]
    SeedFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A collection of agent documents keyed by `id`.
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// Every stored agent, ordered by id.
    async fn list(&self) -> Result<Vec<Agent>, StoreError>;

    async fn find(&self, id: &str) -> Result<Option<Agent>, StoreError>;

    /// Writes `agent` in one call, replacing the document stored under
    /// `old_id`. When the id changed the old entry disappears; an existing
    /// document under the new id is never overwritten.
    async fn replace(&self, old_id: &str, agent: &Agent) -> Result<(), StoreError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Opens the store named by `config.url`.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn AgentStore>, StoreError> {
    let url = config.require_url()?;
    let scheme = url.split_once("://").map(|(scheme, _)| scheme);

    let store: Arc<dyn AgentStore> = match scheme {
        Some("memory") => {
            let store = match &config.seed {
                Some(path) => MemoryAgentStore::from_seed_file(path)?,
                None => MemoryAgentStore::new(),
            };
            Arc::new(store)
        }
        #[cfg(feature = "redis-store")]
        Some("redis") | Some("rediss") => {
            Arc::new(RedisAgentStore::connect(url, &config.collection).await?)
        }
        _ => {
            return Err(StoreError::UnsupportedScheme {
                url: redact(url),
            });
        }
    };

    info!(
        backend = store.backend(),
        collection = %config.collection,
        "Document store connected"
    );
    Ok(store)
}

/// Drops credentials from a connection string before it is logged or shown.
/// Only the authority part (up to the first `/` after the scheme) is searched.
pub(crate) fn redact(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority = rest.split_once('/').map_or(rest, |(authority, _)| authority);
    match authority.rfind('@') {
        Some(at) => format!("{scheme}://***{}", &rest[at..]),
        None => url.to_string(),
    }
}

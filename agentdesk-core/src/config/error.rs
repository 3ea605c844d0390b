use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing document store connection string - set {env} or [store].url")]
    MissingStoreUrl { env: &'static str },

    #[error("invalid bind address '{value}' in [rest].bind")]
    InvalidBind { value: String },

    #[error("collection name must not be empty")]
    EmptyCollection,
}

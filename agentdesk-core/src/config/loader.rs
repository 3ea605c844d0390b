use super::app::{AppConfig, RestConfig, StoreConfig, UpdateConfig};
use super::error::ConfigError;
use super::{CONFIG_PATH, STORE_URL_ENV};
use crate::domain::BlankPolicy;
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    store: RawStore,
    #[serde(default)]
    rest: RawRest,
    #[serde(default)]
    update: RawUpdate,
}

#[derive(Debug, Deserialize, Default)]
struct RawStore {
    url: Option<String>,
    collection: Option<String>,
    seed: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct RawRest {
    bind: Option<String>,
    cors_origins: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
struct RawUpdate {
    blank_strings: Option<BlankPolicy>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename("config/.env");
    });
}

/// Load configuration from a file path, with `AGENT_STORE_URL` taken from the
/// process environment.
///
/// An explicit path must exist. Without one, a missing `config/agentdesk.toml`
/// simply means "use defaults".
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with_env<F>(path: Option<&Path>, env: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match path {
        Some(path) => read_raw(path)?,
        None => match read_raw(Path::new(CONFIG_PATH)) {
            Err(ConfigError::NotFound { .. }) => {
                debug!(path = CONFIG_PATH, "No config file found, using defaults");
                RawConfig::default()
            }
            other => other?,
        },
    };

    build(raw, env)
}

fn read_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    debug!(path = %path.display(), "Reading agentdesk configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn build<F>(raw: RawConfig, env: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let expand = |s: &str| -> String {
        shellexpand::full_with_context_no_errors(s, dirs_home, |var| env(var))
            .into_owned()
    };

    let url = env(STORE_URL_ENV)
        .filter(|value| !value.trim().is_empty())
        .or(raw.store.url)
        .map(|url| expand(&url));

    let collection = raw
        .store
        .collection
        .unwrap_or_else(|| super::app::DEFAULT_COLLECTION.to_string());
    if collection.trim().is_empty() {
        return Err(ConfigError::EmptyCollection);
    }

    let defaults = RestConfig::default();
    let rest = RestConfig {
        bind: raw.rest.bind.map(|b| expand(&b)).unwrap_or(defaults.bind),
        cors_origins: raw.rest.cors_origins.unwrap_or(defaults.cors_origins),
    };
    rest.bind_addr()?;

    Ok(AppConfig {
        store: StoreConfig {
            url,
            collection,
            seed: raw.store.seed.map(|seed| PathBuf::from(expand(&seed))),
        },
        rest,
        update: UpdateConfig {
            blank_strings: raw.update.blank_strings.unwrap_or_default(),
        },
    })
}

fn dirs_home() -> Option<String> {
    std::env::var("HOME").ok()
}

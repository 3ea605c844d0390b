pub mod app;
pub mod error;
pub mod loader;

/// Default config file path - can be overridden via CLI argument
pub const CONFIG_PATH: &str = "config/agentdesk.toml";

/// Environment variable holding the document store connection string.
pub const STORE_URL_ENV: &str = "AGENT_STORE_URL";

pub use app::{AppConfig, RestConfig, StoreConfig, UpdateConfig};
pub use error::ConfigError;
pub use loader::{ensure_env_loaded, load_config, load_config_with_env};

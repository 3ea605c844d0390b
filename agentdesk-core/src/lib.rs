//! Agent records, their document store, the REST API that exposes them and
//! the editor that drives that API.

pub mod application;
pub mod config;
pub mod domain;
pub mod editor;
pub mod infrastructure;
#[cfg(feature = "tui")]
pub mod tui;

pub use application::{AgentRepository, RepositoryError};
pub use config::{AppConfig, ConfigError};
pub use domain::{Agent, AgentUpdate, BlankPolicy, UpdateAgentRequest};
pub use infrastructure::{dto, http_client, store};

#[cfg(feature = "server")]
pub use infrastructure::server;

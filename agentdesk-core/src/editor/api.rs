use crate::domain::{Agent, UpdateAgentRequest};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("agent not found")]
    NotFound,
    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiClientError {
    /// Short text for the editor's status line.
    pub fn user_message(&self) -> String {
        match self {
            ApiClientError::Transport { .. } => "Could not reach the agent API.".to_string(),
            ApiClientError::NotFound => "Agent not found.".to_string(),
            ApiClientError::Status { message, .. } => message.clone(),
            ApiClientError::Decode(_) => "The agent API sent an unexpected response.".to_string(),
        }
    }
}

/// Operations the editor needs from the agent API.
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// All agents; an API reporting "no agents" yields an empty list.
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiClientError>;

    async fn get_agent(&self, id: &str) -> Result<Agent, ApiClientError>;

    async fn update_agent(&self, request: &UpdateAgentRequest) -> Result<String, ApiClientError>;
}

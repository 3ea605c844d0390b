//! reqwest client for the `/api/agent` endpoints.

use crate::domain::{Agent, UpdateAgentRequest};
use crate::editor::api::{AgentApi, ApiClientError};
use crate::infrastructure::dto::{
    AgentListResponse, AgentResponse, ErrorResponse, GetAgentRequest, MessageResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct HttpAgentApi {
    http: Client,
    endpoint: String,
}

impl HttpAgentApi {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ApiClientError> {
        let base = base_url.as_ref().trim_end_matches('/');
        let endpoint = format!("{base}/api/agent");
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ApiClientError::Transport {
                url: endpoint.clone(),
                source,
            })?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport(&self, source: reqwest::Error) -> ApiClientError {
        ApiClientError::Transport {
            url: self.endpoint.clone(),
            source,
        }
    }

    async fn read<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiClientError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport(e))?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| ApiClientError::Decode(e.to_string()));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiClientError::NotFound);
        }

        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| status.to_string());
        Err(ApiClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AgentApi for HttpAgentApi {
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiClientError> {
        debug!(url = %self.endpoint, "GET agents");
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        match self.read::<AgentListResponse>(response).await {
            Ok(list) => Ok(list.agents),
            Err(ApiClientError::NotFound) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    async fn get_agent(&self, id: &str) -> Result<Agent, ApiClientError> {
        debug!(url = %self.endpoint, id, "POST agent lookup");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GetAgentRequest { id: id.to_string() })
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        Ok(self.read::<AgentResponse>(response).await?.agent)
    }

    async fn update_agent(&self, request: &UpdateAgentRequest) -> Result<String, ApiClientError> {
        debug!(url = %self.endpoint, old_id = %request.old_id, "PUT agent update");
        let response = self
            .http
            .put(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        Ok(self.read::<MessageResponse>(response).await?.message)
    }
}

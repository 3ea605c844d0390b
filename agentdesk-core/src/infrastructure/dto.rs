//! JSON bodies exchanged over `/api/agent`, shared by the server and the
//! editor's HTTP client.

use crate::domain::Agent;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use crate::domain::UpdateAgentRequest;

pub const AGENTS_NOT_FOUND: &str = "Agents not found";
pub const AGENT_NOT_FOUND: &str = "Agent not found";
pub const AGENT_ID_TAKEN: &str = "Agent id already exists";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const AGENT_UPDATED: &str = "Agent updated successfully!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgentListResponse {
    #[schema(value_type = Vec<Object>)]
    pub agents: Vec<Agent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GetAgentRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgentResponse {
    #[schema(value_type = Object)]
    pub agent: Agent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

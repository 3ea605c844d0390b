use super::routes;
use crate::domain::{Dna, Tool};
use crate::infrastructure::dto::{
    AgentListResponse, AgentResponse, ErrorResponse, GetAgentRequest, HealthResponse,
    MessageResponse, UpdateAgentRequest,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::agent::list_agents_handler,
        routes::agent::get_agent_handler,
        routes::agent::update_agent_handler,
        routes::health::health_handler
    ),
    components(
        schemas(
            AgentListResponse,
            AgentResponse,
            GetAgentRequest,
            UpdateAgentRequest,
            MessageResponse,
            ErrorResponse,
            HealthResponse,
            Dna,
            Tool
        )
    ),
    tags(
        (name = "agent", description = "Read and edit agent records"),
        (name = "health", description = "Liveness probe")
    )
)]
pub(super) struct ApiDoc;

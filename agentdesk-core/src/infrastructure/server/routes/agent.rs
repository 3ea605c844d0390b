use super::super::error::ApiError;
use super::super::state::ServerState;
use crate::infrastructure::dto::{
    AGENT_UPDATED, AgentListResponse, AgentResponse, ErrorResponse, GetAgentRequest,
    MessageResponse, UpdateAgentRequest,
};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    get,
    path = "/api/agent",
    tag = "agent",
    responses(
        (status = 200, description = "All stored agents", body = AgentListResponse),
        (status = 404, description = "No agent is stored", body = ErrorResponse),
        (status = 500, description = "Document store failure", body = ErrorResponse)
    )
)]
pub async fn list_agents_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<AgentListResponse>, ApiError> {
    info!("Fetching agents");
    let agents = state.repository().list().await?;
    Ok(Json(AgentListResponse { agents }))
}

#[utoipa::path(
    post,
    path = "/api/agent",
    tag = "agent",
    request_body = GetAgentRequest,
    responses(
        (status = 200, description = "The requested agent", body = AgentResponse),
        (status = 404, description = "Unknown agent id", body = ErrorResponse),
        (status = 500, description = "Malformed body or document store failure", body = ErrorResponse)
    )
)]
pub async fn get_agent_handler(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<GetAgentRequest>, JsonRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let Json(request) = payload?;
    info!(id = %request.id, "Fetching agent");
    let agent = state.repository().get(&request.id).await?;
    Ok(Json(AgentResponse { agent }))
}

#[utoipa::path(
    put,
    path = "/api/agent",
    tag = "agent",
    request_body = UpdateAgentRequest,
    responses(
        (status = 200, description = "Agent updated", body = MessageResponse),
        (status = 404, description = "Unknown oldId", body = ErrorResponse),
        (status = 409, description = "newId is taken by another agent", body = ErrorResponse),
        (status = 500, description = "Malformed body or document store failure", body = ErrorResponse)
    )
)]
pub async fn update_agent_handler(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<UpdateAgentRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    info!(old_id = %request.old_id, new_id = ?request.new_id, "Updating agent");
    state.repository().update_from_request(request).await?;
    Ok(Json(MessageResponse {
        message: AGENT_UPDATED.to_string(),
    }))
}

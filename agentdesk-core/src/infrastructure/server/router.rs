use super::docs::ApiDoc;
use super::error::ServerError;
use super::routes;
use super::state::ServerState;
use crate::application::AgentRepository;
use crate::config::RestConfig;
use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Routes, docs and CORS for the agent API, bound to one repository.
pub fn build_router(repository: AgentRepository, rest: &RestConfig) -> Result<Router, ServerError> {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&rest.cors_origins)?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    let state = Arc::new(ServerState::new(repository));
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route(
            "/api/agent",
            get(routes::agent::list_agents_handler)
                .post(routes::agent::get_agent_handler)
                .put(routes::agent::update_agent_handler),
        )
        .route("/health", get(routes::health::health_handler))
        .layer(cors)
        .with_state(state);

    Ok(app)
}

pub async fn serve(
    repository: AgentRepository,
    rest: &RestConfig,
    addr: SocketAddr,
) -> Result<(), ServerError> {
    let app = build_router(repository, rest)?;
    info!(%addr, "Binding REST server");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    serve_listener(listener, app).await
}

/// Serves `app` on an already bound listener until the server stops.
pub async fn serve_listener(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "REST server ready to accept connections");
    }

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ServerError::Serve)
}

fn allowed_origins(origins: &[String]) -> Result<AllowOrigin, ServerError> {
    if origins.iter().any(|origin| origin == "*") {
        return Ok(AllowOrigin::any());
    }
    let values = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ServerError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(AllowOrigin::list(values))
}

use crate::application::RepositoryError;
use crate::infrastructure::dto::{
    AGENT_ID_TAKEN, AGENT_NOT_FOUND, AGENTS_NOT_FOUND, ErrorResponse, INTERNAL_ERROR,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),
    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Failure of a single API request, rendered as `{"error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("agent id '{0}' already exists")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Internal details stay in the server log.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::NotFound(message) => (*message).to_string(),
            ApiError::Conflict(_) => AGENT_ID_TAKEN.to_string(),
            ApiError::Internal(_) => INTERNAL_ERROR.to_string(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Empty => ApiError::NotFound(AGENTS_NOT_FOUND),
            RepositoryError::NotFound(_) => ApiError::NotFound(AGENT_NOT_FOUND),
            RepositoryError::Conflict(id) => ApiError::Conflict(id),
            RepositoryError::Store(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Internal(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) => error!(error = %detail, "Error processing request"),
            other => debug!(error = %other, "Request rejected"),
        }
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use moviemock_core::mocks::UpstreamError;
use moviemock_core::types::route::UnsupportedMethod;
use serde_json::json;

/// Failures the host answers for instead of a mock route.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Method(#[from] UnsupportedMethod),
    #[error("Failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServerError::Method(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ServerError::Upstream(err) => tracing::error!(error = %err, "Upstream request failed"),
            other => tracing::warn!(error = %other, "Request rejected"),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

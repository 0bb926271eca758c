use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use cinefav_core::error::CinefavError;

/// Proxy error type; every variant renders as `{"error": message}`.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Translate a failed upstream call.
    ///
    /// An upstream 404 becomes `not_found` when the route distinguishes it;
    /// everything else collapses into a 500 carrying `failure`.
    pub fn from_upstream(err: CinefavError, not_found: Option<&str>, failure: &str) -> Self {
        match (&err, not_found) {
            (CinefavError::NotFound(_), Some(msg)) => ServerError::NotFound(msg.to_string()),
            _ => {
                tracing::error!(error = %err, "{failure}");
                ServerError::Upstream(failure.to_string())
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ServerError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias for server handler results.
pub type Result<T> = std::result::Result<T, ServerError>;

//! Unified API error handling.
//!
//! Every handler returns `Result<T, ApiError>`; errors render as
//! `{"error": "<code>", "message": "<human readable>"}` with a matching status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::analyze::AnalyzeError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error("session not found: {0}")]
    SessionNotFound(Uuid),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Analyze(AnalyzeError::EmptyInput) => (StatusCode::BAD_REQUEST, "empty_input"),
            ApiError::Analyze(AnalyzeError::Busy) => (StatusCode::CONFLICT, "busy"),
            ApiError::Analyze(AnalyzeError::Cancelled) => (StatusCode::CONFLICT, "cancelled"),
            ApiError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        tracing::debug!(target: "api", %status, code, "request rejected");
        let body = ErrorResponse {
            error: code.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

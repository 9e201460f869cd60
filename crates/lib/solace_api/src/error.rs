//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use solace_core::completion::CompletionError;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Client-facing text for a missing or empty `message`.
pub const MESSAGE_REQUIRED: &str = "message is required";

/// Client-facing text for any upstream failure.
pub const UPSTREAM_ERROR: &str = "Upstream API error";

/// Client-facing text for any internal failure.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Only `Validation` exposes its message; upstream and internal detail stays
/// in the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::Validation(m) => m,
            AppError::Upstream(_) => UPSTREAM_ERROR.to_string(),
            AppError::Internal(_) => INTERNAL_ERROR.to_string(),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<CompletionError> for AppError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Upstream { .. } | CompletionError::Timeout => {
                AppError::Upstream(e.to_string())
            }
            CompletionError::Transport(_)
            | CompletionError::Decode(_)
            | CompletionError::Config(_) => AppError::Internal(e.to_string()),
        }
    }
}

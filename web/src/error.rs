//! Error types for web handlers.
//!
//! Handlers return [`AppError`], which renders as a JSON body with a stable
//! error code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler(State(state): State<LiveState<C>>) -> Result<String, AppError> {
///     let metrics = state.metrics.as_ref().ok_or_else(|| AppError::not_found("Metrics are disabled"))?;
///     Ok(metrics.render())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: &'static str,
}

impl AppError {
    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            code: "NOT_FOUND",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status, code = self.code, message = %self.message, "Request rejected");

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = AppError::not_found("Metrics are disabled");
        assert_eq!(err.to_string(), "[NOT_FOUND] Metrics are disabled");
    }

    #[test]
    fn test_into_response_uses_status() {
        let response = AppError::not_found("gone").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

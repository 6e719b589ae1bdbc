//! API error types and response formatting.
//!
//! Every handler converts its failures into an [`ApiError`] at its own
//! boundary; nothing propagates past a handler un-translated. The wire
//! contract is a JSON object with a single `error` key whose value is
//! derived from the underlying failure's description.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request (missing field, malformed body or URL).
    #[error("{0}")]
    BadRequest(String),

    /// The target record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Outbound link-preview fetch failed.
    #[error("Failed to fetch link preview: {0}")]
    Upstream(String),

    /// Storage failure.
    #[error("{0}")]
    Store(#[from] slated_core::Error),

    /// Internal server error.
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Validation error naming the offending field.
    pub fn missing_field(field: &str) -> Self {
        Self::BadRequest(format!("Missing required field: {field}"))
    }
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(err) => {
                tracing::error!(error = %err, "link preview fetch failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Store(err) => {
                tracing::error!(error = %err, "storage error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request field
    #[error("Validation error: {0}")]
    Validation(String),
    /// Downstream hop returned a non-success status
    #[error("Upstream failure ({status}): {details}")]
    Upstream {
        status: StatusCode,
        details: serde_json::Value,
    },
    /// Unexpected failure while handling the request
    #[error("Internal error: {0}")]
    Internal(String),
    /// Transport-level failure talking to a downstream service
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            Self::Upstream { status, details } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Failed to forward request downstream",
                    "statusCode": status.as_u16(),
                    "details": details,
                }),
            ),
            Self::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to process request", "details": msg }),
            ),
            Self::HttpRequest(err) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Failed to reach downstream service",
                    "details": err.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::Validation(_) => "validation_error",
        AppError::Upstream { .. } => "upstream_failure",
        AppError::Internal(_) => "internal_error",
        AppError::HttpRequest(_) => "http_request_error",
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

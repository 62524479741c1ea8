//! Adapter errors and their HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reqguard_core::ValidationError;
use thiserror::Error;

/// Errors raised while guarding a request
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request body too large: exceeds limit of {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Invalid request body")]
    InvalidBody,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Validated body missing from request")]
    MissingValidatedBody,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InvalidBody | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingValidatedBody | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BodyTooLarge { .. } => "BODY_TOO_LARGE",
            ApiError::InvalidBody => "INVALID_BODY",
            ApiError::Validation(err) => err.code(),
            ApiError::MissingValidatedBody => "MISSING_VALIDATED_BODY",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "Request guard failed");
        }
        (status, Json(serde_json::json!({ "message": self.to_string() }))).into_response()
    }
}

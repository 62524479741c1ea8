//! Request middleware
//!
//! - JSON body validation against a schema
//! - Request logging

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use http_body_util::LengthLimitError;
use reqguard_core::{Engine, Object, Schema, Value};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::extract::ValidatedBody;

/// State shared by every request passing through [`validate_json_body`]
#[derive(Debug, Clone)]
pub struct ValidationState {
    pub schema: Arc<Schema>,
    pub engine: Arc<Engine>,
    pub config: Arc<ApiConfig>,
}

impl ValidationState {
    pub fn new(schema: Schema, config: ApiConfig) -> Self {
        Self {
            schema: Arc::new(schema),
            engine: Arc::new(Engine::new(config.engine.clone())),
            config: Arc::new(config),
        }
    }
}

/// Validate and normalise a JSON object body.
///
/// On success the transformed object is stored as a [`ValidatedBody`]
/// extension and the request continues with the re-serialised body. On
/// failure the chain stops with a `{"message": ...}` response.
pub async fn validate_json_body(
    State(state): State<ValidationState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let limit = state.config.max_body_size;
    validate_request_size(request.headers(), limit)?;

    let (mut parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| body_read_error(e, limit))?;

    let mut object = parse_object(&bytes)?;
    if let Err(err) = state.engine.evaluate(&mut object, &state.schema) {
        tracing::debug!(
            uri = %parts.uri,
            code = err.code(),
            field = err.field().unwrap_or(""),
            "Request body rejected"
        );
        return Err(err.into());
    }

    let normalised = serde_json::to_vec(&object).map_err(|e| ApiError::Internal(e.to_string()))?;
    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(normalised.len()));
    parts.extensions.insert(ValidatedBody(object));

    Ok(next.run(Request::from_parts(parts, Body::from(normalised))).await)
}

/// Map a buffering failure: 413 for the length limit, 400 for anything else
fn body_read_error(err: axum::Error, limit: usize) -> ApiError {
    let inner = err.into_inner();
    let mut source: Option<&(dyn StdError + 'static)> = Some(inner.as_ref());
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return ApiError::BodyTooLarge { limit };
        }
        source = e.source();
    }
    tracing::warn!(error = %inner, "Failed to read request body");
    ApiError::InvalidBody
}

fn parse_object(bytes: &[u8]) -> Result<Object, ApiError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => {
            tracing::debug!(kind = %other.kind(), "Request body is not a JSON object");
            Err(ApiError::InvalidBody)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Request body is not valid JSON");
            Err(ApiError::InvalidBody)
        }
    }
}

/// Reject requests whose declared length exceeds `max_size`
pub fn validate_request_size(headers: &HeaderMap, max_size: usize) -> Result<(), ApiError> {
    if let Some(content_length) = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
    {
        if content_length > max_size {
            return Err(ApiError::BodyTooLarge { limit: max_size });
        }
    }
    Ok(())
}

/// Request logging middleware
///
/// Logs method, path, status and timing for every request.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let start = Instant::now();
    let response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

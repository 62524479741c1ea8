//! reqguard axum adapter
//!
//! Guards routes with a [`Schema`](reqguard_core::Schema): the JSON body is decoded, evaluated and
//! normalised before the handler runs. Rejections answer with a 4xx status
//! and a `{"message": ...}` body; accepted bodies reach the handler through
//! the [`ValidatedBody`] extractor.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{routing::post, Json, Router};
//! use reqguard_api::{guard, ApiConfig, ValidatedBody, ValidationState};
//! use reqguard_core::predicates::IsEmail;
//! use reqguard_core::{FieldRule, Schema};
//!
//! async fn subscribe(body: ValidatedBody) -> Json<serde_json::Value> {
//!     Json(reqguard_core::Value::Object(body.into_inner()).to_json())
//! }
//!
//! # async fn run() -> anyhow::Result<()> {
//! let schema = Schema::builder()
//!     .field(FieldRule::required("email").check(IsEmail, "Invalid email address"))
//!     .build()?;
//! let state = ValidationState::new(schema, ApiConfig::default());
//! let app: Router = guard(Router::new().route("/subscribe", post(subscribe)), state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;

pub use config::ApiConfig;
pub use error::ApiError;
pub use extract::ValidatedBody;
pub use middleware::{
    request_logging_middleware, validate_json_body, validate_request_size, ValidationState,
};

use axum::Router;

/// Run [`validate_json_body`] in front of every route of `router`
pub fn guard<S>(router: Router<S>, state: ValidationState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(axum::middleware::from_fn_with_state(
        state,
        validate_json_body,
    ))
}

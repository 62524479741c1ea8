//! Demo server guarding a signup endpoint with a reqguard schema

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use reqguard_api::{guard, request_logging_middleware, ApiConfig, ValidatedBody, ValidationState};
use reqguard_core::config::MAX_DEPTH_ENV;
use reqguard_core::predicates::{
    EachWithOptions, IsAlphanumeric, IsEmail, IsIn, IsNotEmpty, IsString, Length, MinLength,
};
use reqguard_core::transforms::{TitleCase, ToLower, Trim};
use reqguard_core::{FieldRule, Schema, SchemaError, Value};
use serde_json::json;
use tower_http::trace::TraceLayer;

#[derive(Parser, Debug)]
#[command(name = "reqguard-demo")]
#[command(about = "Serve a sample signup endpoint guarded by reqguard", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "REQGUARD_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Maximum schema nesting depth
    #[arg(long, env = MAX_DEPTH_ENV)]
    max_depth: Option<usize>,

    /// Maximum request body size in bytes
    #[arg(long, env = reqguard_api::config::MAX_BODY_SIZE_ENV)]
    max_body_size: Option<usize>,
}

fn signup_schema() -> Result<Schema, SchemaError> {
    let address = Schema::builder()
        .field(
            FieldRule::required("city")
                .transform(Trim)
                .transform(TitleCase::default())
                .check(IsNotEmpty, "City is required"),
        )
        .field(FieldRule::optional("country").check(Length::new(2, 2), "Country must be a 2-letter code"))
        .build()?;

    let contact = Schema::builder()
        .field(FieldRule::required("kind").check(IsIn::new(["phone", "email"]), ""))
        .field(FieldRule::required("value").transform(Trim).check_with(IsString))
        .build()?;

    Schema::builder()
        .field(
            FieldRule::required("username")
                .transform(Trim)
                .check(IsNotEmpty, "Username is required")
                .check(IsAlphanumeric, "Username must be alphanumeric"),
        )
        .field(
            FieldRule::required("email")
                .transform(Trim)
                .transform(ToLower)
                .check(IsNotEmpty, "Email is required")
                .check(IsEmail, "Invalid email address"),
        )
        .field(
            FieldRule::required("password")
                .check(IsNotEmpty, "Password is required")
                .check(MinLength::new(6), "Password must be at least 6 characters"),
        )
        .field(FieldRule::optional("address").nested(address))
        .field(FieldRule::optional("contacts").check_with(EachWithOptions::new(contact)))
        .build()
}

async fn signup(body: ValidatedBody) -> Json<serde_json::Value> {
    let mut user = Value::Object(body.into_inner()).to_json();
    if let Some(fields) = user.as_object_mut() {
        fields.remove("password");
    }
    Json(json!({ "success": true, "user": user }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = ApiConfig::default();
    if let Some(max_depth) = cli.max_depth {
        anyhow::ensure!(max_depth > 0, "--max-depth must be greater than zero");
        config.engine.max_depth = max_depth;
    }
    if let Some(max_body_size) = cli.max_body_size {
        anyhow::ensure!(max_body_size > 0, "--max-body-size must be greater than zero");
        config.max_body_size = max_body_size;
    }

    let schema = signup_schema().context("Failed to build signup schema")?;
    let state = ValidationState::new(schema, config);

    let app = Router::new()
        .merge(guard(Router::new().route("/signup", post(signup)), state))
        .route("/health", get(health))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http());

    tracing::info!(
        bind = %cli.bind,
        version = env!("CARGO_PKG_VERSION"),
        "Starting reqguard demo server"
    );

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! HTTP server for the image gateway.
//!
//! Assembles the axum router over a [`Gateway`], maps typed gateway
//! errors to HTTP responses, and owns process startup and shutdown.
//!
//! Routes:
//! - `POST /upload` - Accept a multipart image upload
//! - `GET /images` - List records with live remote status
//! - `POST /restore/{id}` - Re-upload a record's local blob
//! - `DELETE /images/{id}` - Delete a record and both copies
//! - `GET /files/{filename}` - Serve a stored blob
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus metrics

pub mod handlers;
pub mod types;

mod metrics;

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::error::Error;
use crate::gateway::Gateway;

use types::ErrorResponse;

/// Transport headroom on top of the upload ceiling for multipart framing.
///
/// The gateway enforces the exact ceiling; the body limit only guards the
/// transport against unbounded bodies.
const BODY_LIMIT_HEADROOM: u64 = 64 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) gateway: Gateway,
    pub(crate) metrics: PrometheusHandle,
}

/// Error wrapper that renders gateway errors as HTTP responses.
///
/// The status comes from [`Error::status_code`]; the body is a JSON
/// [`ErrorResponse`]. Server-side failures are logged with their full
/// cause chain, clients only see the top-level message.
pub(crate) struct AppError(Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(status = status.as_u16(), error = format!("{:#}", self.0), "Request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Build the application router around a gateway.
///
/// Also used by integration tests to serve an in-memory gateway.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed.
pub fn app(gateway: Gateway) -> Result<Router> {
    let body_limit = usize::try_from(
        gateway
            .limits()
            .max_upload_bytes
            .saturating_add(BODY_LIMIT_HEADROOM),
    )
    .unwrap_or(usize::MAX);

    let state = AppState {
        gateway,
        metrics: metrics::prometheus_handle()?,
    };

    Ok(Router::new()
        .route("/upload", post(handlers::upload_image))
        .route("/images", get(handlers::list_images))
        .route("/images/{id}", delete(handlers::delete_image))
        .route("/restore/{id}", post(handlers::restore_image))
        .route("/files/{filename}", get(handlers::serve_file))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_text))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(Duration::from_secs(
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )))
        .layer(CorsLayer::permissive())
        .with_state(state))
}

/// Run the gateway server with the given configuration.
///
/// Validates the configuration, opens the file-backed stores, and serves
/// until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a store cannot be
/// opened, or the listen address cannot be bound.
pub async fn run(config: Config) -> Result<()> {
    let report = config.validate()?;
    for warning in &report.warnings {
        warn!("{warning}");
    }

    let gateway = Gateway::open(&config)?;
    let app = app(gateway)?;

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Gateway listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolves when the process receives a shutdown signal.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

//! Health and metrics handlers.

use axum::{Json, extract::State};
use chrono::Utc;

use super::super::AppState;
use super::super::types::HealthResponse;

/// GET /health - Health check.
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// GET /metrics - Prometheus-format metrics.
pub(crate) async fn metrics_text(State(state): State<AppState>) -> String {
    state.metrics.render()
}

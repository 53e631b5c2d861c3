//! Health check endpoints

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Basic health check
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness probe
pub async fn live() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe
///
/// Reports the configured backend without calling it; a backend outage is
/// surfaced per-request rather than by flapping readiness.
pub async fn ready(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "backend": state.config.backend.url,
    }))
}

//! HTTP API routes

pub mod certificate;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Public API routes (everything this service exposes is public)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/certificate/{*path}", get(certificate::certificate_entry))
        .route(
            "/certificates/{id}/testimonial",
            post(certificate::submit_testimonial),
        )
}

/// Health check routes, mounted outside the API prefix
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
}

//! Error types and handling
//!
//! This module provides the error handling framework for the viewer service.
//! All errors are converted to a consistent JSON response format.
//!
//! Link failures deliberately collapse invalid and expired tokens into one
//! variant so the response gives no oracle for distinguishing a tampered link
//! from an expired one.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Certificate link failed to decode or has expired (410)
    #[error("Invalid or expired certificate link")]
    InvalidOrExpiredLink,

    /// Certificate id resolved but the backend has no record (404)
    #[error("Certificate not found: {0}")]
    CertificateNotFound(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unprocessable entity - validation failed (422)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Backend unreachable at the transport level; retryable (502)
    #[error("Backend unreachable: {0}")]
    BackendUnreachable(String),

    /// Backend API returned an unexpected response (502)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Export pipeline exhausted all capture paths (500)
    #[error("Export failed: {0}")]
    Export(String),

    /// An export for this certificate is already in flight (409)
    #[error("An export is already in progress for this certificate")]
    ExportBusy,

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Service unavailable (503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Error response body
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggested recovery action for the viewer UI (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            recovery: None,
        }
    }

    /// Add details to the error response
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Add a recovery hint
    pub fn with_recovery(mut self, recovery: impl Into<String>) -> Self {
        self.recovery = Some(recovery.into());
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, should_log) = match &self {
            AppError::InvalidOrExpiredLink => (StatusCode::GONE, "invalid_or_expired_link", false),
            AppError::CertificateNotFound(_) => {
                (StatusCode::NOT_FOUND, "certificate_not_found", false)
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", false),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", false),
            AppError::ValidationError(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", false)
            }
            AppError::BackendUnreachable(_) => {
                (StatusCode::BAD_GATEWAY, "backend_unreachable", true)
            }
            AppError::Backend(_) => (StatusCode::BAD_GATEWAY, "backend_error", true),
            AppError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "export_failed", true),
            AppError::ExportBusy => (StatusCode::CONFLICT, "export_busy", false),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", true),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", true),
            AppError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", true)
            }
        };

        // Log server errors
        if should_log {
            error!(error = %self, error_type = error_type, "Request error");
        }

        let body = match &self {
            AppError::InvalidOrExpiredLink => ErrorResponse::new(error_type, self.to_string())
                .with_recovery("Request a new certificate link from the issuer"),
            AppError::CertificateNotFound(_) => ErrorResponse::new(error_type, self.to_string())
                .with_recovery("Contact the issuing organization"),
            AppError::BackendUnreachable(_) => ErrorResponse::new(error_type, self.to_string())
                .with_recovery("Check your connection and reload the page"),
            AppError::Backend(_) => ErrorResponse::new(error_type, self.to_string())
                .with_recovery("Try again in a few minutes"),
            AppError::Export(_) => ErrorResponse::new(error_type, self.to_string())
                .with_recovery("Try the download again"),
            _ => ErrorResponse::new(error_type, self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

// Implement From for common error types

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

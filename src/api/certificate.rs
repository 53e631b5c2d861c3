//! Certificate viewer endpoints
//!
//! The certificate wildcard route accepts both link shapes (opaque token or
//! legacy three-segment path) and dispatches on a trailing `/image` or
//! `/share` suffix, since the link portion itself may contain slashes.

use std::collections::HashSet;
use std::sync::Mutex;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::export::export_certificate;
use crate::models::{CertificateView, TestimonialSubmission};
use crate::render::requires_library_lookup;
use crate::services::backend::FetchError;
use crate::services::share::{build_share_target, SharePlatform};
use crate::services::{resolve, CertificateLookupKey, ResolveError};
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::{validate_identifier, validate_student_name, validate_testimonial};
use crate::AppState;

/// Query parameters accepted across the certificate routes
#[derive(Debug, Default, Deserialize)]
pub struct CertificateQuery {
    /// Name entered at view time (new-format certificates)
    pub name: Option<String>,
    /// Share platform, `/share` suffix only
    pub platform: Option<String>,
    /// Device pixel ratio hint, `/image` suffix only
    #[serde(alias = "dpr")]
    pub pixel_ratio: Option<f32>,
}

/// Viewer payload for a resolved certificate
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewerPayload {
    certificate: CertificateView,
    needs_name: bool,
    status: &'static str,
    canonical_url: String,
}

/// Entry point for `GET /api/v1/certificate/{*path}`
pub async fn certificate_entry(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<CertificateQuery>,
) -> AppResult<Response> {
    if let Some(base) = path.strip_suffix("/image") {
        export_image(&state, base, &query).await
    } else if let Some(base) = path.strip_suffix("/share") {
        share_target(&state, base, &query).await
    } else {
        certificate_view(&state, &path, &query).await
    }
}

fn map_resolve_error(err: ResolveError) -> AppError {
    match err {
        ResolveError::InvalidOrExpiredLink => AppError::InvalidOrExpiredLink,
        ResolveError::UnrecognizedPath => {
            AppError::BadRequest("unrecognized certificate path".to_string())
        }
    }
}

fn map_fetch_error(err: FetchError, certificate_id: &str) -> AppError {
    match err {
        FetchError::NotFound => AppError::CertificateNotFound(certificate_id.to_string()),
        FetchError::Network(msg) => AppError::BackendUnreachable(msg),
        FetchError::Unknown(msg) => AppError::Backend(msg),
    }
}

fn canonical_url(state: &AppState, link_path: &str) -> String {
    format!(
        "{}/certificate/{}",
        state.config.server.public_base_url.trim_end_matches('/'),
        link_path
    )
}

/// Resolve a link path and fetch the certificate, hydrating a library
/// template config when the certificate does not carry its own
async fn load_view(
    state: &AppState,
    link_path: &str,
) -> AppResult<(CertificateView, CertificateLookupKey)> {
    let key = resolve(link_path, &state.codec, Utc::now()).map_err(map_resolve_error)?;
    let mut view = state
        .backend
        .get_certificate(&key.certificate_id)
        .await
        .map_err(|e| map_fetch_error(e, &key.certificate_id))?;

    // A certificate with its own saved design never consults the library
    if requires_library_lookup(&view) {
        if let Some(config) = state.backend.get_template(view.effective_template_id()).await {
            view.custom_template_config = Some(config);
        }
    }
    Ok((view, key))
}

async fn certificate_view(
    state: &AppState,
    link_path: &str,
    _query: &CertificateQuery,
) -> AppResult<Response> {
    let (view, key) = load_view(state, link_path).await?;
    info!(
        certificate_id = %key.certificate_id,
        legacy = key.legacy,
        "Serving certificate view"
    );
    let payload = ViewerPayload {
        needs_name: view.needs_name(),
        status: view.status.as_str(),
        canonical_url: canonical_url(state, link_path),
        certificate: view,
    };
    Ok(Json(payload).into_response())
}

/// Removes the in-flight marker when the export finishes, however it ends
struct ExportSlot<'a> {
    set: &'a Mutex<HashSet<String>>,
    key: String,
}

impl<'a> ExportSlot<'a> {
    fn acquire(set: &'a Mutex<HashSet<String>>, key: String) -> Result<Self, AppError> {
        let mut in_flight = set.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(key.clone()) {
            return Err(AppError::ExportBusy);
        }
        Ok(Self { set, key })
    }
}

impl Drop for ExportSlot<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.set.lock().unwrap_or_else(|e| e.into_inner());
        in_flight.remove(&self.key);
    }
}

async fn export_image(
    state: &AppState,
    link_path: &str,
    query: &CertificateQuery,
) -> AppResult<Response> {
    let (view, key) = load_view(state, link_path).await?;

    let _slot = ExportSlot::acquire(&state.exports_in_flight, key.certificate_id.clone())?;

    let entered_name = query.name.as_deref().filter(|n| !n.trim().is_empty());
    let pixel_ratio = query.pixel_ratio.unwrap_or(2.0);
    let artifact = export_certificate(
        &view,
        entered_name,
        &state.http,
        &state.fonts,
        &state.config.export,
        pixel_ratio,
    )
    .await?;

    let headers = [
        (header::CONTENT_TYPE, "image/jpeg".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename),
        ),
    ];
    Ok((headers, artifact.bytes).into_response())
}

async fn share_target(
    state: &AppState,
    link_path: &str,
    query: &CertificateQuery,
) -> AppResult<Response> {
    let platform = query
        .platform
        .as_deref()
        .and_then(SharePlatform::parse)
        .ok_or_else(|| AppError::BadRequest("unknown or missing share platform".to_string()))?;

    let (view, _key) = load_view(state, link_path).await?;
    let org_name = view
        .organization
        .as_ref()
        .map(|o| o.name.as_str())
        .unwrap_or("the issuing organization");
    let url = build_share_target(
        platform,
        &canonical_url(state, link_path),
        view.effective_course_name(),
        org_name,
    );
    Ok(Json(json!({ "url": url })).into_response())
}

/// `POST /api/v1/certificates/{id}/testimonial`
pub async fn submit_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(submission): Json<TestimonialSubmission>,
) -> AppResult<impl IntoResponse> {
    if !validate_identifier(&id) {
        return Err(AppError::BadRequest("invalid certificate id".to_string()));
    }
    submission.validate()?;
    // Length checks alone accept whitespace-only names
    if !validate_student_name(&submission.student_name) {
        return Err(AppError::ValidationError(
            "student name must not be blank".to_string(),
        ));
    }
    if !validate_testimonial(&submission.testimonial) {
        return Err(AppError::ValidationError(
            "testimonial must be at most 2000 characters".to_string(),
        ));
    }

    state
        .backend
        .submit_testimonial(&id, &submission)
        .await
        .map_err(|e| map_fetch_error(e, &id))?;

    info!(certificate_id = %id, "Testimonial accepted");
    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "accepted" }))))
}

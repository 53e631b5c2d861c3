//! Certifyer backend API client
//!
//! Thin HTTP client over the external certificate store. A certificate lookup
//! returns the certificate plus denormalized organization and program
//! snapshots in one response, so a render never observes a partial state
//! where the certificate exists but its organization does not.
//!
//! The client normalizes two backend response generations transparently: an
//! older shape where the student name is embedded and course metadata lives
//! on the program, and the newer shape that separates course-level fields
//! from student identity (allowing name collection at view time).
//!
//! Failure kinds are derived from transport class and HTTP status directly,
//! never inferred from error message text.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::BackendConfig;
use crate::models::{
    CertificateStatus, CertificateView, OrganizationRef, ProgramRef, Signatory, TemplateConfig,
    TestimonialSubmission,
};
use crate::utils::validation::is_library_template_id;

/// Certificate fetch failure taxonomy
#[derive(Debug, Error)]
pub enum FetchError {
    /// Backend has no record for the id; terminal, not retried
    #[error("certificate not found")]
    NotFound,
    /// Transport-level failure; the user may retry manually
    #[error("backend unreachable: {0}")]
    Network(String),
    /// Anything else (unexpected status, malformed body)
    #[error("backend request failed: {0}")]
    Unknown(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            FetchError::Network(err.to_string())
        } else {
            FetchError::Unknown(err.to_string())
        }
    }
}

/// Raw certificate record as the backend returns it
///
/// Field aliases absorb both response generations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCertificate {
    id: String,
    #[serde(default)]
    student_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    course_name: Option<String>,
    #[serde(default)]
    certificate_header: Option<String>,
    #[serde(default)]
    course_description: Option<String>,
    completion_date: String,
    #[serde(default)]
    generated_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    status: CertificateStatus,
    #[serde(default)]
    organization_id: Option<String>,
    #[serde(default)]
    program_id: Option<String>,
    /// Template id from the backend (new shape stores it on the certificate)
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    custom_template_config: Option<TemplateConfig>,
    #[serde(default)]
    signatories: Vec<Signatory>,
    #[serde(default)]
    download_count: Option<u64>,
}

/// Certificate lookup response envelope
#[derive(Debug, Clone, Deserialize)]
struct CertificateLookupResponse {
    certificate: Option<RawCertificate>,
    #[serde(default)]
    organization: Option<OrganizationRef>,
    #[serde(default)]
    program: Option<ProgramRef>,
}

/// Template library lookup response envelope
#[derive(Debug, Clone, Deserialize)]
struct TemplateLookupResponse {
    template: Option<StoredTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
struct StoredTemplate {
    #[serde(default)]
    name: Option<String>,
    config: TemplateConfig,
}

/// HTTP client for the Certifyer backend API
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client from backend configuration
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("certifyer-webui/", env!("CARGO_PKG_VERSION")));

        if let Some(ref api_key) = config.api_key {
            let mut headers = reqwest::header::HeaderMap::new();
            let mut value =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", api_key))?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a certificate with its bundled organization and program
    pub async fn get_certificate(&self, id: &str) -> Result<CertificateView, FetchError> {
        let url = format!("{}/certificates/{}", self.base_url, id);
        debug!(certificate_id = id, "Fetching certificate from backend");

        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            status if !status.is_success() => {
                return Err(FetchError::Unknown(format!(
                    "backend returned {} for certificate lookup",
                    status
                )));
            }
            _ => {}
        }

        let envelope: CertificateLookupResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Unknown(format!("malformed certificate response: {}", e)))?;

        let raw = envelope.certificate.ok_or(FetchError::NotFound)?;
        Ok(normalize(raw, envelope.organization, envelope.program))
    }

    /// Fetch a stored template configuration from the template library
    ///
    /// Best-effort: callers treat any failure as "use default visuals". Only
    /// ids matching the library naming pattern are looked up at all.
    pub async fn get_template(&self, template_id: &str) -> Option<TemplateConfig> {
        if !is_library_template_id(template_id) {
            return None;
        }

        let url = format!("{}/templates/{}", self.base_url, template_id);
        let result = async {
            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                return Ok::<Option<StoredTemplate>, reqwest::Error>(None);
            }
            let envelope: TemplateLookupResponse = response.json().await?;
            Ok(envelope.template)
        }
        .await;

        match result {
            Ok(Some(stored)) => {
                info!(
                    template_id,
                    template_name = stored.name.as_deref().unwrap_or("unnamed"),
                    "Loaded template config from library"
                );
                Some(stored.config)
            }
            Ok(None) => {
                debug!(template_id, "Template library has no stored config");
                None
            }
            Err(err) => {
                // Not critical; the certificate still renders with defaults
                warn!(template_id, error = %err, "Template library lookup failed");
                None
            }
        }
    }

    /// Submit a testimonial collected alongside view-time name entry
    ///
    /// Fire-and-forget relative to certificate display; a failure here never
    /// blocks showing the certificate.
    pub async fn submit_testimonial(
        &self,
        certificate_id: &str,
        submission: &TestimonialSubmission,
    ) -> Result<(), FetchError> {
        let url = format!(
            "{}/certificates/{}/testimonial",
            self.base_url, certificate_id
        );

        let response = self.client.post(&url).json(submission).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Unknown(format!(
                "testimonial submission returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Merge a raw certificate and its bundled snapshots into a `CertificateView`
fn normalize(
    raw: RawCertificate,
    organization: Option<OrganizationRef>,
    program: Option<ProgramRef>,
) -> CertificateView {
    let verification_code = CertificateView::verification_code_for(&raw.id);
    CertificateView {
        verification_code,
        student_name: raw.student_name,
        email: raw.email,
        course_name: raw.course_name,
        certificate_header: raw.certificate_header,
        course_description: raw.course_description,
        completion_date: raw.completion_date,
        issued_date: raw.generated_at,
        status: raw.status.normalized(),
        organization_id: raw
            .organization_id
            .or_else(|| organization.as_ref().map(|o| o.id.clone())),
        program_id: raw
            .program_id
            .or_else(|| program.as_ref().map(|p| p.id.clone())),
        organization,
        program,
        template_id: raw.template,
        custom_template_config: raw.custom_template_config,
        signatories: raw.signatories,
        download_count: raw.download_count.unwrap_or(0),
        id: raw.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize_json(body: &str) -> CertificateView {
        let envelope: CertificateLookupResponse = serde_json::from_str(body).unwrap();
        let raw = envelope.certificate.unwrap();
        normalize(raw, envelope.organization, envelope.program)
    }

    #[test]
    fn test_normalize_new_shape() {
        let view = normalize_json(
            r#"{
                "certificate": {
                    "id": "c-123456789",
                    "courseName": "Systems Programming",
                    "certificateHeader": "Certificate of Excellence",
                    "courseDescription": "Low-level plumbing",
                    "completionDate": "2024-05-20",
                    "status": "active",
                    "organizationId": "o1",
                    "programId": "p1",
                    "template": "template3",
                    "signatories": [
                        {"name": "Dr. Smith", "title": "Dean", "signatureUrl": "https://cdn.x/s.png"}
                    ]
                },
                "organization": {"id": "o1", "name": "Acme Academy", "logo": "https://cdn.x/logo.png"},
                "program": {"id": "p1", "name": "Systems Track"}
            }"#,
        );

        assert_eq!(view.id, "c-123456789");
        // New shape: no embedded student name, collected at view time
        assert!(view.needs_name());
        assert_eq!(view.effective_course_name(), "Systems Programming");
        assert_eq!(view.status, CertificateStatus::Valid);
        assert_eq!(view.template_id.as_deref(), Some("template3"));
        assert_eq!(view.signatories.len(), 1);
        assert_eq!(view.organization.as_ref().unwrap().name, "Acme Academy");
        assert_eq!(view.verification_code, "VER-23456789");
    }

    #[test]
    fn test_normalize_legacy_shape() {
        let view = normalize_json(
            r#"{
                "certificate": {
                    "id": "legacy-1",
                    "studentName": "Ada Lovelace",
                    "completionDate": "2023-01-15",
                    "status": "valid"
                },
                "organization": {"id": "o2", "name": "Old School"},
                "program": {
                    "id": "p2",
                    "name": "Analytical Engines",
                    "description": "Very old course",
                    "template": "template2"
                }
            }"#,
        );

        assert!(!view.needs_name());
        assert_eq!(view.recipient_name(None), "Ada Lovelace");
        // Legacy shape: course metadata comes from the program snapshot
        assert_eq!(view.effective_course_name(), "Analytical Engines");
        assert_eq!(view.effective_description(), "Very old course");
        assert_eq!(view.effective_template_id(), "template2");
        // Ids backfilled from the bundled snapshots
        assert_eq!(view.organization_id.as_deref(), Some("o2"));
        assert_eq!(view.program_id.as_deref(), Some("p2"));
    }

    #[test]
    fn test_normalize_custom_config_survives() {
        let view = normalize_json(
            r##"{
                "certificate": {
                    "id": "c9",
                    "completionDate": "2024-01-01",
                    "template": "template5",
                    "customTemplateConfig": {"name": "Saved Design", "colors": {"accentColor": "#112233"}}
                }
            }"##,
        );

        let config = view.custom_template_config.as_ref().unwrap();
        assert_eq!(config.name, "Saved Design");
        assert_eq!(config.colors.accent_color, "#112233");
    }
}

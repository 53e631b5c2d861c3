//! Certificate view models
//!
//! The `CertificateView` is the normalized, fully-merged in-memory
//! representation of a certificate ready for rendering. It is assembled from
//! the backend lookup response and owned exclusively by the viewer request
//! that fetched it; nothing here is persisted locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::TemplateConfig;

/// Display status of a certificate
///
/// The backend reports `active` for freshly issued certificates; that value is
/// normalized to `valid` at display time so the viewer only ever deals with
/// three states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    #[default]
    Valid,
    Revoked,
    Expired,
    /// Backend synonym for valid
    Active,
}

impl CertificateStatus {
    /// Collapse backend `active` into `valid` for display purposes
    pub fn normalized(self) -> Self {
        match self {
            CertificateStatus::Active => CertificateStatus::Valid,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self.normalized() {
            CertificateStatus::Revoked => "revoked",
            CertificateStatus::Expired => "expired",
            _ => "valid",
        }
    }
}

/// Denormalized organization snapshot bundled with a certificate lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRef {
    pub id: String,
    pub name: String,
    /// Organization logo URL (may be cross-origin)
    #[serde(default, alias = "logoUrl")]
    pub logo: Option<String>,
    /// Branding color as a hex string (e.g. "#314E85")
    #[serde(default)]
    pub brand_color: Option<String>,
}

/// Denormalized program snapshot bundled with a certificate lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Template id configured at the program level (legacy shape)
    #[serde(default)]
    pub template: Option<String>,
}

/// A certificate signatory slot
///
/// A slot renders only when `name` is non-empty; the signature image is
/// independently optional and falls back to a blank underline rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Signatory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub signature_url: Option<String>,
}

impl Signatory {
    /// Whether this slot should render at all
    pub fn renders(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// The normalized in-memory certificate representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateView {
    /// Opaque primary identity
    pub id: String,
    /// Absent for new-format certificates until the student supplies it
    pub student_name: Option<String>,
    pub email: Option<String>,
    pub course_name: Option<String>,
    pub certificate_header: Option<String>,
    pub course_description: Option<String>,
    /// ISO-ish date string; formatted only at render time
    pub completion_date: String,
    pub issued_date: Option<DateTime<Utc>>,
    pub status: CertificateStatus,
    pub organization: Option<OrganizationRef>,
    pub program: Option<ProgramRef>,
    pub organization_id: Option<String>,
    pub program_id: Option<String>,
    /// Built-in template key; ignored when `custom_template_config` is present
    pub template_id: Option<String>,
    /// Data-driven design override; always wins over `template_id`
    pub custom_template_config: Option<TemplateConfig>,
    pub signatories: Vec<Signatory>,
    /// Derived verification code (VER- + last 8 chars of id)
    pub verification_code: String,
    pub download_count: u64,
}

impl CertificateView {
    /// Derive the verification code the viewer displays
    pub fn verification_code_for(id: &str) -> String {
        let start = id.char_indices().rev().nth(7).map(|(i, _)| i).unwrap_or(0);
        format!("VER-{}", &id[start..])
    }

    /// Effective course name with fallback chain: certificate field, then
    /// program name, then a generic label
    pub fn effective_course_name(&self) -> &str {
        self.course_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.program.as_ref().map(|p| p.name.as_str()))
            .unwrap_or("Course")
    }

    pub fn effective_header(&self) -> &str {
        self.certificate_header
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Certificate of Completion")
    }

    pub fn effective_description(&self) -> &str {
        self.course_description
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.program
                    .as_ref()
                    .and_then(|p| p.description.as_deref())
            })
            .unwrap_or("")
    }

    /// Effective template id with fallback chain: certificate field, then
    /// program-level template, then the default template
    pub fn effective_template_id(&self) -> &str {
        self.template_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.program
                    .as_ref()
                    .and_then(|p| p.template.as_deref())
            })
            .unwrap_or("template1")
    }

    /// Recipient name used for rendering: stored name, then a name entered at
    /// view time, then a placeholder
    pub fn recipient_name<'a>(&'a self, entered: Option<&'a str>) -> &'a str {
        self.student_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(entered.filter(|s| !s.trim().is_empty()))
            .unwrap_or("Student")
    }

    /// Whether the viewer must collect a name before rendering
    pub fn needs_name(&self) -> bool {
        self.student_name
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
    }
}

/// Testimonial submitted alongside view-time name collection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialSubmission {
    #[validate(length(min = 1, max = 200))]
    pub student_name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub testimonial: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub program_id: String,
}

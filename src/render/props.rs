//! Normalized template prop contract
//!
//! Every template variant receives the same prop shape, assembled once from
//! the `CertificateView`. Variants own their layout, color and font choices;
//! the contract only fixes what data is available.

use chrono::{Datelike, NaiveDate};

use crate::models::{CertificateView, Signatory};

/// Render mode for a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Scaled-down interactive view shown to the student
    Student,
    /// Full-size canonical render used for export and catalog previews
    TemplateSelection,
}

impl RenderMode {
    /// Preview scale applied in student mode
    pub fn scale(self) -> f32 {
        match self {
            RenderMode::Student => 0.3,
            RenderMode::TemplateSelection => 1.0,
        }
    }
}

/// The normalized inputs every template variant consumes
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateProps {
    pub header: String,
    pub course_title: String,
    pub description: String,
    /// Human-formatted completion date
    pub date: String,
    pub recipient_name: String,
    pub organization_name: Option<String>,
    pub organization_logo: Option<String>,
    /// At most two slots are rendered
    pub signatories: Vec<Signatory>,
    pub preview: bool,
    pub mode: RenderMode,
}

impl TemplateProps {
    /// Assemble props from a certificate view
    pub fn from_view(view: &CertificateView, entered_name: Option<&str>, mode: RenderMode) -> Self {
        let org = view.organization.as_ref();
        Self {
            header: view.effective_header().to_string(),
            course_title: view.effective_course_name().to_string(),
            description: view.effective_description().to_string(),
            date: format_display_date(&view.completion_date),
            recipient_name: view.recipient_name(entered_name).to_string(),
            organization_name: org.map(|o| o.name.clone()),
            organization_logo: org.and_then(|o| o.logo.clone()),
            signatories: view
                .signatories
                .iter()
                .filter(|s| s.renders())
                .take(2)
                .cloned()
                .collect(),
            preview: mode == RenderMode::Student,
            mode,
        }
    }
}

/// Format an ISO-ish date for display ("June 11, 2024")
///
/// Unparseable input is shown verbatim rather than dropped, so the date
/// always survives the formatting round trip in some form.
pub fn format_display_date(raw: &str) -> String {
    let candidate = raw.split('T').next().unwrap_or(raw);
    match NaiveDate::parse_from_str(candidate, "%Y-%m-%d") {
        Ok(date) => {
            let month = [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ][date.month0() as usize];
            format!("{} {}, {}", month, date.day(), date.year())
        }
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2024-06-11"), "June 11, 2024");
        assert_eq!(format_display_date("2023-01-05"), "January 5, 2023");
        assert_eq!(
            format_display_date("2024-06-11T10:30:00Z"),
            "June 11, 2024"
        );
    }

    #[test]
    fn test_format_display_date_passthrough_on_garbage() {
        assert_eq!(format_display_date("mid-June 2024"), "mid-June 2024");
        assert_eq!(format_display_date(""), "");
    }

    #[test]
    fn test_mode_scale() {
        assert_eq!(RenderMode::Student.scale(), 0.3);
        assert_eq!(RenderMode::TemplateSelection.scale(), 1.0);
    }
}

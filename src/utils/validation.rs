//! Input validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for built-in template library keys ("template1" .. "template15")
static TEMPLATE_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^template\d+$").unwrap());

/// Regex for backend identifiers (org/program/certificate ids)
static IDENTIFIER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").unwrap());

/// Whether a template id names a built-in library template
///
/// Only ids of this shape trigger a template-library lookup; anything else
/// renders with the internal default visuals.
pub fn is_library_template_id(id: &str) -> bool {
    TEMPLATE_ID_REGEX.is_match(id)
}

/// Validate an opaque backend identifier
pub fn validate_identifier(id: &str) -> bool {
    !id.is_empty() && id.len() <= 128 && IDENTIFIER_REGEX.is_match(id)
}

/// Validate a student name entered at view time
pub fn validate_student_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.len() <= 200
}

/// Validate a testimonial body
pub fn validate_testimonial(text: &str) -> bool {
    text.len() <= 2000
}

//! Share target construction
//!
//! Pure URL building for the five supported share platforms. The share text
//! is a fixed template over the course and organization names; the canonical
//! certificate URL comes from the resolver layer.

use serde::Deserialize;
use urlencoding::encode;

/// Supported share platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Facebook,
    Twitter,
    Linkedin,
    Whatsapp,
    Email,
}

impl SharePlatform {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "facebook" => Some(Self::Facebook),
            "twitter" => Some(Self::Twitter),
            "linkedin" => Some(Self::Linkedin),
            "whatsapp" => Some(Self::Whatsapp),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

/// Fixed share message for a completed course
fn share_text(course_name: &str, org_name: &str) -> String {
    format!(
        "I've completed the {} at {}! \u{1F393} #Certificate #Achievement",
        course_name, org_name
    )
}

/// Build the external share URL for a platform
pub fn build_share_target(
    platform: SharePlatform,
    canonical_url: &str,
    course_name: &str,
    org_name: &str,
) -> String {
    let text = share_text(course_name, org_name);
    match platform {
        SharePlatform::Facebook => format!(
            "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
            encode(canonical_url),
            encode(&text)
        ),
        SharePlatform::Twitter => format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            encode(&text),
            encode(canonical_url)
        ),
        SharePlatform::Linkedin => format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}&summary={}",
            encode(canonical_url),
            encode(&text)
        ),
        SharePlatform::Whatsapp => format!(
            "https://wa.me/?text={}",
            encode(&format!("{} {}", text, canonical_url))
        ),
        SharePlatform::Email => format!(
            "mailto:?subject={}&body={}",
            encode("My Certificate Achievement"),
            encode(&format!("{}\n\n{}", text, canonical_url))
        ),
    }
}

//! Certificate URL resolution
//!
//! Two URL shapes are supported indefinitely, since previously issued links
//! use either form:
//!
//! - `/certificate/{token}` — single opaque encrypted segment (current)
//! - `/certificate/{orgId}/{programId}/{certId}` — legacy explicit segments
//!
//! When the explicit certificate id segment is present the path is treated as
//! legacy regardless of what the other segments look like. Token decoding is
//! only attempted for the single-segment shape, and a token failure is
//! terminal: it never falls back to a legacy interpretation, so an expired
//! link cannot masquerade as "not found".

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::services::token::{LinkCodec, TokenPayload};

/// Canonical lookup key produced by URL resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateLookupKey {
    pub certificate_id: String,
    /// Identity context when the link carried it (token form always does)
    pub organization_id: Option<String>,
    pub program_id: Option<String>,
    /// Whether the key came from the legacy three-segment form
    pub legacy: bool,
}

/// URL resolution failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Token failed to decode or has expired; terminal, no legacy fallback
    #[error("invalid or expired certificate link")]
    InvalidOrExpiredLink,
    /// Path shape matches neither supported form
    #[error("unrecognized certificate path")]
    UnrecognizedPath,
}

/// Resolve a raw certificate path into a canonical lookup key
pub fn resolve(
    raw_path: &str,
    codec: &LinkCodec,
    now: DateTime<Utc>,
) -> Result<CertificateLookupKey, ResolveError> {
    let segments: Vec<&str> = raw_path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    match segments.as_slice() {
        // Legacy: explicit certificate id present, segments used verbatim
        [org_id, program_id, certificate_id] => {
            debug!(certificate_id, "Resolved legacy certificate path");
            Ok(CertificateLookupKey {
                certificate_id: (*certificate_id).to_string(),
                organization_id: Some((*org_id).to_string()),
                program_id: Some((*program_id).to_string()),
                legacy: true,
            })
        }
        // Single wildcard segment: must be a token
        [token] => match codec.decode(token, now) {
            Ok(TokenPayload {
                organization_id,
                program_id,
                certificate_id,
                ..
            }) => {
                debug!(%certificate_id, "Resolved certificate link token");
                Ok(CertificateLookupKey {
                    certificate_id,
                    organization_id: Some(organization_id),
                    program_id: Some(program_id),
                    legacy: false,
                })
            }
            Err(err) => {
                // Malformed and expired deliberately collapse here
                warn!(error = %err, "Certificate link token rejected");
                Err(ResolveError::InvalidOrExpiredLink)
            }
        },
        _ => Err(ResolveError::UnrecognizedPath),
    }
}

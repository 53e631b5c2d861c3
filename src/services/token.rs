//! Certificate link token codec
//!
//! Encodes the certificate identity (organization, program, certificate,
//! issue timestamp) into an opaque, URL-safe token using ChaCha20-Poly1305
//! with a key derived from the configured link secret. The AEAD tag means a
//! tampered token fails authentication rather than decoding to garbage.
//!
//! Expiry is checked inside `decode`; expired and malformed tokens surface as
//! the same error variant group so callers cannot distinguish a tampered link
//! from a stale one.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    ChaCha20Poly1305, Key, Nonce,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

/// Nonce length prepended to every token (ChaCha20-Poly1305 standard nonce)
const NONCE_LEN: usize = 12;

/// Identity payload carried by a certificate link token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub organization_id: String,
    pub program_id: String,
    pub certificate_id: String,
    /// Issue instant; expiry is computed from this plus the validity window
    #[serde(with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,
}

/// Token decode failure
///
/// The two variants exist for internal logging only; user-facing handling maps
/// both to the same "invalid or expired link" error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Token did not decode, decrypt, or parse
    #[error("malformed certificate link token")]
    Malformed,
    /// Token decoded but the validity window has elapsed
    #[error("certificate link token expired")]
    Expired,
}

/// Codec for certificate link tokens
#[derive(Clone)]
pub struct LinkCodec {
    cipher: ChaCha20Poly1305,
    validity_window: Duration,
}

impl LinkCodec {
    /// Create a codec from the configured link secret and validity window
    pub fn new(secret: &str, validity_window: Duration) -> Self {
        let key_bytes = Sha256::digest(secret.as_bytes());
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&key_bytes));
        Self {
            cipher,
            validity_window,
        }
    }

    /// Encode a payload into a URL-safe opaque token
    ///
    /// The token is `base64url(nonce || ciphertext)` with no padding, usable
    /// directly as a path segment. No structure is readable without the key.
    pub fn encode(&self, payload: &TokenPayload) -> Result<String, TokenError> {
        let plaintext = serde_json::to_vec(payload).map_err(|_| TokenError::Malformed)?;

        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_ref())
            .map_err(|_| TokenError::Malformed)?;

        let mut raw = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(&nonce);
        raw.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(raw))
    }

    /// Decode a token and enforce the validity window
    ///
    /// A token is valid if and only if it decrypts successfully and
    /// `now - issued_at <= validity_window`.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<TokenPayload, TokenError> {
        let payload = self.decode_unchecked(token)?;

        // The wire format carries whole seconds, so the window check must not
        // see subsecond residue from `now` (a token checked at exactly the
        // window edge is still valid)
        let elapsed_secs = now.timestamp() - payload.issued_at.timestamp();
        if elapsed_secs > self.validity_window.num_seconds() {
            debug!(
                certificate_id = %payload.certificate_id,
                elapsed_days = elapsed_secs / 86_400,
                "Certificate link token past validity window"
            );
            return Err(TokenError::Expired);
        }

        Ok(payload)
    }

    /// Remaining validity of a token, for informational display only
    ///
    /// Returns `None` when the token does not decode or has already expired.
    /// The authoritative expiry check lives in [`LinkCodec::decode`].
    pub fn time_remaining(&self, token: &str, now: DateTime<Utc>) -> Option<Duration> {
        let payload = self.decode_unchecked(token).ok()?;
        let elapsed_secs = now.timestamp() - payload.issued_at.timestamp();
        let remaining_secs = self.validity_window.num_seconds() - elapsed_secs;
        if remaining_secs >= 0 {
            Some(Duration::seconds(remaining_secs))
        } else {
            None
        }
    }

    /// Decrypt and parse without the expiry check
    fn decode_unchecked(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let normalized = normalize_token(token);

        let raw = URL_SAFE_NO_PAD
            .decode(normalized.as_bytes())
            .map_err(|_| TokenError::Malformed)?;

        if raw.len() <= NONCE_LEN {
            return Err(TokenError::Malformed);
        }
        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| TokenError::Malformed)?;

        serde_json::from_slice(&plaintext).map_err(|_| TokenError::Malformed)
    }
}

/// Normalize a token that may or may not still be percent-encoded
///
/// The routing layer may hand the token over either already percent-decoded
/// or still carrying escapes, depending on how many layers processed the URL.
/// Presence of a `%` escape marks the still-encoded state; the base64url
/// alphabet itself never contains `%`.
fn normalize_token(token: &str) -> String {
    if token.contains('%') {
        match urlencoding::decode(token) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => token.to_string(),
        }
    } else {
        token.to_string()
    }
}

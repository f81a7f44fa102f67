//! Domain Value Objects
//!
//! Immutable value types for the session domain.

use derive_more::Display;
use serde::Serialize;

pub use platform::client::ClientFingerprint;

/// Random bytes behind a session key (256 bits)
pub const SESSION_KEY_BYTES: usize = 32;

/// Bearer token granting heartbeat/release rights over one session
///
/// `Display` prints the full token; use [`SessionKey::redacted`] in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct SessionKey(String);

impl SessionKey {
    /// Draw a fresh key from the CSPRNG
    ///
    /// Collisions are not checked: with 2^256 possible keys and a bounded
    /// table they do not happen in practice.
    pub fn generate() -> Self {
        Self(platform::crypto::random_hex(SESSION_KEY_BYTES))
    }

    /// Wrap a client-supplied key. Empty strings are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, for log correlation
    pub fn redacted(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

/// Outcome of a read-only session check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Valid,
    NotFound,
    Expired,
    FingerprintMismatch,
}

impl ValidationStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "VALID",
            ValidationStatus::NotFound => "NOT_FOUND",
            ValidationStatus::Expired => "EXPIRED",
            ValidationStatus::FingerprintMismatch => "FINGERPRINT_MISMATCH",
        }
    }
}

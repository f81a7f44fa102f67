//! Domain Entities

use crate::domain::value_objects::{ClientFingerprint, SessionKey};

/// Session entity - one anonymous client's claim on the service
///
/// All timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone)]
pub struct Session {
    pub key: SessionKey,
    pub fingerprint: ClientFingerprint,
    pub created_at_ms: i64,
    pub last_heartbeat_ms: i64,
    pub expires_at_ms: i64,
    /// Always true once created
    pub claimed: bool,
}

impl Session {
    /// Create a session claimed at `now_ms`
    pub fn new(fingerprint: ClientFingerprint, now_ms: i64, timeout_ms: i64) -> Self {
        Self {
            key: SessionKey::generate(),
            fingerprint,
            created_at_ms: now_ms,
            last_heartbeat_ms: now_ms,
            expires_at_ms: now_ms.saturating_add(timeout_ms),
            claimed: true,
        }
    }

    /// Logically deleted once `now_ms` passes `expires_at_ms`
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at_ms
    }

    pub fn is_owned_by(&self, fingerprint: &ClientFingerprint) -> bool {
        self.fingerprint.matches(fingerprint)
    }

    /// Push expiry to `now_ms + timeout_ms` (saturating); returns the new expiry
    pub fn heartbeat(&mut self, now_ms: i64, timeout_ms: i64) -> i64 {
        self.last_heartbeat_ms = now_ms;
        self.expires_at_ms = now_ms.saturating_add(timeout_ms);
        self.expires_at_ms
    }
}

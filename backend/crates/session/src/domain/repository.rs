//! Repository Traits
//!
//! Interfaces for the session table. Implementation is in infrastructure layer.
//!
//! Every method receives the current time so that expiry decisions are made
//! against one consistent instant per request.

use crate::domain::entities::Session;
use crate::domain::value_objects::{ClientFingerprint, SessionKey, ValidationStatus};
use crate::error::SessionResult;

/// Result of a successful claim
#[derive(Debug, Clone)]
pub struct ClaimOutcome {
    /// Copy of the stored session
    pub session: Session,
    /// True when a live session for the same fingerprint was returned
    pub reused: bool,
}

/// Session repository trait
///
/// Implementations must run each method's check-then-act sequence atomically
/// with respect to other methods on the same table.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Return the live session of `fingerprint`, or create one.
    ///
    /// Fails with `CapacityExceeded` when a new session is needed and the
    /// table (expired-but-unswept entries included) is full.
    async fn claim(&self, fingerprint: &ClientFingerprint, now_ms: i64)
    -> SessionResult<ClaimOutcome>;

    /// Extend a session; returns the new expiry.
    ///
    /// Expired entries are purged and reported as `NotFound`.
    async fn heartbeat(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<i64>;

    /// Remove a session owned by `fingerprint`.
    async fn release(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<()>;

    /// Read-only check. Expired entries found here are purged.
    async fn validate(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<ValidationStatus>;

    /// Remove every expired session; returns how many were removed.
    async fn sweep(&self, now_ms: i64) -> SessionResult<usize>;

    /// Number of stored sessions, expired-but-unswept included.
    async fn count(&self) -> SessionResult<usize>;
}

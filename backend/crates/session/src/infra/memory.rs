//! In-memory Session Repository
//!
//! One process-wide table behind a mutex. Each repository method takes the
//! lock once and does all of its reads and writes under it, so claim,
//! heartbeat, release, validate and sweep never interleave.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::application::config::SessionConfig;
use crate::domain::entities::Session;
use crate::domain::repository::{ClaimOutcome, SessionRepository};
use crate::domain::value_objects::{ClientFingerprint, SessionKey, ValidationStatus};
use crate::error::{SessionError, SessionResult};

/// Process-local session table
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionKey, Session>>,
    timeout_ms: i64,
    capacity: usize,
}

impl MemorySessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_limits(config.session_timeout_ms(), config.max_sessions)
    }

    pub fn with_limits(timeout_ms: i64, capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::with_capacity(capacity)),
            timeout_ms,
            capacity,
        }
    }

    /// Copy of a stored session, expired or not
    pub fn get(&self, key: &SessionKey) -> Option<Session> {
        self.sessions.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    fn claim_now(&self, fingerprint: &ClientFingerprint, now_ms: i64) -> SessionResult<ClaimOutcome> {
        let mut sessions = self.sessions.lock();

        if let Some(existing) = sessions
            .values()
            .find(|s| !s.is_expired_at(now_ms) && s.is_owned_by(fingerprint))
        {
            return Ok(ClaimOutcome {
                session: existing.clone(),
                reused: true,
            });
        }

        // Counts expired-but-unswept entries too
        if sessions.len() >= self.capacity {
            return Err(SessionError::CapacityExceeded);
        }

        let session = Session::new(fingerprint.clone(), now_ms, self.timeout_ms);
        sessions.insert(session.key.clone(), session.clone());

        Ok(ClaimOutcome {
            session,
            reused: false,
        })
    }

    fn heartbeat_now(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<i64> {
        let mut sessions = self.sessions.lock();

        let session = sessions.get_mut(key).ok_or(SessionError::NotFound)?;
        if session.is_expired_at(now_ms) {
            sessions.remove(key);
            return Err(SessionError::NotFound);
        }
        if !session.is_owned_by(fingerprint) {
            return Err(SessionError::FingerprintMismatch);
        }

        Ok(session.heartbeat(now_ms, self.timeout_ms))
    }

    fn release_now(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<()> {
        let mut sessions = self.sessions.lock();

        let session = sessions.get(key).ok_or(SessionError::NotFound)?;
        if session.is_expired_at(now_ms) {
            sessions.remove(key);
            return Err(SessionError::NotFound);
        }
        if !session.is_owned_by(fingerprint) {
            return Err(SessionError::FingerprintMismatch);
        }

        sessions.remove(key);
        Ok(())
    }

    fn validate_now(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> ValidationStatus {
        let mut sessions = self.sessions.lock();

        let Some(session) = sessions.get(key) else {
            return ValidationStatus::NotFound;
        };
        if session.is_expired_at(now_ms) {
            sessions.remove(key);
            return ValidationStatus::Expired;
        }
        if !session.is_owned_by(fingerprint) {
            return ValidationStatus::FingerprintMismatch;
        }
        ValidationStatus::Valid
    }

    fn sweep_now(&self, now_ms: i64) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now_ms));
        before - sessions.len()
    }
}

impl SessionRepository for MemorySessionStore {
    async fn claim(
        &self,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<ClaimOutcome> {
        self.claim_now(fingerprint, now_ms)
    }

    async fn heartbeat(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<i64> {
        self.heartbeat_now(key, fingerprint, now_ms)
    }

    async fn release(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<()> {
        self.release_now(key, fingerprint, now_ms)
    }

    async fn validate(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<ValidationStatus> {
        Ok(self.validate_now(key, fingerprint, now_ms))
    }

    async fn sweep(&self, now_ms: i64) -> SessionResult<usize> {
        Ok(self.sweep_now(now_ms))
    }

    async fn count(&self) -> SessionResult<usize> {
        Ok(self.len())
    }
}

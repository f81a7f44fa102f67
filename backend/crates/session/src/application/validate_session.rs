//! Validate Session Use Case
//!
//! Read-only check consumed by gates in front of other services.

use crate::domain::repository::SessionRepository;
use crate::domain::value_objects::{ClientFingerprint, SessionKey, ValidationStatus};
use crate::error::SessionResult;
use std::sync::Arc;

/// Validate Session Use Case
pub struct ValidateSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> ValidateSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<ValidationStatus> {
        let status = self
            .session_repo
            .validate(key, fingerprint, now_ms)
            .await?;

        if !status.is_valid() {
            tracing::debug!(
                session = key.redacted(),
                reason = status.as_str(),
                "Session validation failed"
            );
        }

        Ok(status)
    }
}

//! Heartbeat Use Case

use crate::domain::repository::SessionRepository;
use crate::domain::value_objects::{ClientFingerprint, SessionKey};
use crate::error::SessionResult;
use std::sync::Arc;

/// Output DTO for heartbeat
#[derive(Debug, Clone)]
pub struct HeartbeatOutput {
    pub expires_at_ms: i64,
}

/// Heartbeat Use Case
pub struct HeartbeatUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> HeartbeatUseCase<S>
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
    ) -> SessionResult<HeartbeatOutput> {
        let expires_at_ms = self
            .session_repo
            .heartbeat(key, fingerprint, now_ms)
            .await?;

        tracing::debug!(session = key.redacted(), expires_at_ms, "Session heartbeat");

        Ok(HeartbeatOutput { expires_at_ms })
    }
}

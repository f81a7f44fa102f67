//! Claim Session Use Case

use crate::application::config::SessionConfig;
use crate::domain::repository::SessionRepository;
use crate::domain::value_objects::{ClientFingerprint, SessionKey};
use crate::error::SessionResult;
use std::sync::Arc;

/// Output DTO for claim session
#[derive(Debug, Clone)]
pub struct ClaimSessionOutput {
    pub session_key: SessionKey,
    pub expires_at_ms: i64,
    pub heartbeat_interval_ms: i64,
    pub reused: bool,
}

/// Claim Session Use Case
pub struct ClaimSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<SessionConfig>,
}

impl<S> ClaimSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<SessionConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<ClaimSessionOutput> {
        let outcome = self.session_repo.claim(fingerprint, now_ms).await?;

        if outcome.reused {
            tracing::debug!(
                session = outcome.session.key.redacted(),
                "Reused live session for fingerprint"
            );
        } else {
            tracing::info!(
                session = outcome.session.key.redacted(),
                expires_at_ms = outcome.session.expires_at_ms,
                "Session claimed"
            );
        }

        Ok(ClaimSessionOutput {
            session_key: outcome.session.key,
            expires_at_ms: outcome.session.expires_at_ms,
            heartbeat_interval_ms: self.config.heartbeat_interval_ms(),
            reused: outcome.reused,
        })
    }
}

//! Release Session Use Case

use crate::domain::repository::SessionRepository;
use crate::domain::value_objects::{ClientFingerprint, SessionKey};
use crate::error::SessionResult;
use std::sync::Arc;

/// Release Session Use Case
pub struct ReleaseSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> ReleaseSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Remove the session. A second release of the same key is `NotFound`.
    pub async fn execute(
        &self,
        key: &SessionKey,
        fingerprint: &ClientFingerprint,
        now_ms: i64,
    ) -> SessionResult<()> {
        self.session_repo.release(key, fingerprint, now_ms).await?;

        tracing::info!(session = key.redacted(), "Session released");

        Ok(())
    }
}

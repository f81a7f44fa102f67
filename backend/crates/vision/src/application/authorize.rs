//! Vision Gate
//!
//! Authorization sequence in front of the external model: session first,
//! rate limit second. An unauthenticated caller never consumes budget.

use crate::application::config::VisionConfig;
use crate::error::{VisionError, VisionResult};
use platform::client::ClientFingerprint;
use platform::rate_limit::{RateLimitResult, RateLimitStore};
use session::SessionKey;
use session::SessionRepository;
use session::application::ValidateSessionUseCase;
use std::sync::Arc;

/// Vision Gate
pub struct VisionGate<R, L>
where
    R: SessionRepository,
    L: RateLimitStore,
{
    sessions: Arc<R>,
    limiter: Arc<L>,
    config: Arc<VisionConfig>,
}

impl<R, L> VisionGate<R, L>
where
    R: SessionRepository,
    L: RateLimitStore,
{
    pub fn new(sessions: Arc<R>, limiter: Arc<L>, config: Arc<VisionConfig>) -> Self {
        Self {
            sessions,
            limiter,
            config,
        }
    }

    /// Admit one call for `client_id`, or say why not
    ///
    /// On success the returned window state feeds the rate limit headers.
    pub async fn authorize(
        &self,
        key: Option<&SessionKey>,
        fingerprint: &ClientFingerprint,
        client_id: &str,
        now_ms: i64,
    ) -> VisionResult<RateLimitResult> {
        let key = key.ok_or(VisionError::MissingSessionKey)?;

        let status = ValidateSessionUseCase::new(self.sessions.clone())
            .execute(key, fingerprint, now_ms)
            .await?;
        if !status.is_valid() {
            return Err(VisionError::InvalidSession(status));
        }

        let window = self
            .limiter
            .check_and_increment(client_id, &self.config.rate_limit, now_ms)
            .await;
        if !window.allowed {
            return Err(VisionError::RateLimited {
                retry_after_secs: window.retry_after_secs(now_ms),
            });
        }

        tracing::debug!(
            session = key.redacted(),
            client = %client_id,
            remaining = window.remaining,
            "Vision request admitted"
        );

        Ok(window)
    }
}

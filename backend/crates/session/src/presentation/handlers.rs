//! HTTP Handlers

use crate::application::config::SessionConfig;
use crate::application::{ClaimSessionUseCase, HeartbeatUseCase, ReleaseSessionUseCase};
use crate::domain::repository::SessionRepository;
use crate::domain::value_objects::SessionKey;
use crate::error::{SessionError, SessionResult};
use crate::presentation::dto::{ClaimResponse, HeartbeatResponse, ReleaseResponse, to_iso8601};
use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use platform::client::extract_fingerprint;
use std::net::SocketAddr;
use std::sync::Arc;

/// Header carrying the session key on heartbeat, release and gated calls
pub const SESSION_KEY_HEADER: &str = "x-session-key";

/// Shared state for session handlers
pub struct SessionAppState<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<SessionConfig>,
}

// Manual impl: the store itself is not `Clone`, only the `Arc`s are cloned
impl<R> Clone for SessionAppState<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Read the `X-Session-Key` header; absent, empty or non-ASCII yields `None`
pub fn extract_session_key(headers: &HeaderMap) -> Option<SessionKey> {
    headers
        .get(SESSION_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(SessionKey::parse)
}

/// GET /api/session/claim
pub async fn claim<R>(
    State(state): State<SessionAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> SessionResult<Json<ClaimResponse>>
where
    R: SessionRepository + Send + Sync + 'static,
{
    let fingerprint = extract_fingerprint(&headers, Some(addr.ip()));

    let use_case = ClaimSessionUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(&fingerprint, platform::now_ms()).await?;

    Ok(Json(ClaimResponse {
        success: true,
        session_key: output.session_key.to_string(),
        expires_at: to_iso8601(output.expires_at_ms),
        heartbeat_interval: output.heartbeat_interval_ms,
        reused: output.reused,
    }))
}

/// POST /api/session/heartbeat
pub async fn heartbeat<R>(
    State(state): State<SessionAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> SessionResult<Json<HeartbeatResponse>>
where
    R: SessionRepository + Send + Sync + 'static,
{
    let key = extract_session_key(&headers).ok_or(SessionError::MissingSessionKey)?;
    let fingerprint = extract_fingerprint(&headers, Some(addr.ip()));

    let use_case = HeartbeatUseCase::new(state.repo.clone());
    let output = use_case
        .execute(&key, &fingerprint, platform::now_ms())
        .await?;

    Ok(Json(HeartbeatResponse {
        success: true,
        expires_at: to_iso8601(output.expires_at_ms),
    }))
}

/// POST /api/session/release
pub async fn release<R>(
    State(state): State<SessionAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> SessionResult<Json<ReleaseResponse>>
where
    R: SessionRepository + Send + Sync + 'static,
{
    let key = extract_session_key(&headers).ok_or(SessionError::MissingSessionKey)?;
    let fingerprint = extract_fingerprint(&headers, Some(addr.ip()));

    let use_case = ReleaseSessionUseCase::new(state.repo.clone());
    use_case
        .execute(&key, &fingerprint, platform::now_ms())
        .await?;

    Ok(Json(ReleaseResponse { success: true }))
}

//! HTTP Handlers

use crate::application::config::VisionConfig;
use crate::application::{AnalyzeImageInput, AnalyzeImageUseCase, VisionGate};
use crate::domain::model::VisionModel;
use crate::error::{VisionError, VisionResult};
use crate::presentation::dto::{VisionRequest, VisionResponse};
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use platform::client::{extract_client_ip, extract_fingerprint};
use platform::rate_limit::{RateLimitResult, RateLimitStore};
use session::SessionRepository;
use session::presentation::extract_session_key;
use std::net::SocketAddr;
use std::sync::Arc;

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Shared state for vision handlers
pub struct VisionAppState<R, L, M>
where
    R: SessionRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
    M: VisionModel + Send + Sync + 'static,
{
    pub sessions: Arc<R>,
    pub limiter: Arc<L>,
    pub model: Arc<M>,
    pub config: Arc<VisionConfig>,
}

impl<R, L, M> Clone for VisionAppState<R, L, M>
where
    R: SessionRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
    M: VisionModel + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            limiter: self.limiter.clone(),
            model: self.model.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /vision
///
/// The body is inspected only after the gate admitted the caller, so an
/// oversized or bad body from an unauthenticated client is still a 401.
pub async fn analyze<R, L, M>(
    State(state): State<VisionAppState<R, L, M>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Result<Bytes, BytesRejection>,
) -> VisionResult<Response>
where
    R: SessionRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
    M: VisionModel + Send + Sync + 'static,
{
    let fingerprint = extract_fingerprint(&headers, Some(addr.ip()));
    let client_id = extract_client_ip(&headers, Some(addr.ip()))
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| fingerprint.to_hex());
    let key = extract_session_key(&headers);

    let gate = VisionGate::new(
        state.sessions.clone(),
        state.limiter.clone(),
        state.config.clone(),
    );
    let window = gate
        .authorize(key.as_ref(), &fingerprint, &client_id, platform::now_ms())
        .await?;

    let body = body.map_err(body_rejection)?;
    let request = parse_body(&body)?;

    let use_case = AnalyzeImageUseCase::new(state.model.clone(), state.config.clone());
    let analysis = use_case
        .execute(AnalyzeImageInput {
            image: request.image,
            prompt: request.prompt,
            model: request.model,
        })
        .await?;

    let mut response = Json(VisionResponse {
        success: true,
        analysis: analysis.text,
        model: analysis.model,
        usage: analysis.usage,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
    .into_response();
    insert_rate_limit_headers(response.headers_mut(), &window);

    Ok(response)
}

fn body_rejection(rejection: BytesRejection) -> VisionError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        VisionError::PayloadTooLarge
    } else {
        VisionError::MalformedInput(rejection.body_text())
    }
}

fn parse_body(body: &[u8]) -> VisionResult<VisionRequest> {
    if body.is_empty() {
        return Err(VisionError::MissingImage);
    }
    serde_json::from_slice(body)
        .map_err(|e| VisionError::MalformedInput(format!("invalid JSON body: {}", e)))
}

fn insert_rate_limit_headers(headers: &mut HeaderMap, window: &RateLimitResult) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(window.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(window.remaining));
    headers.insert(X_RATELIMIT_RESET, HeaderValue::from(window.reset_at_ms));
}

//! Vision Router

use crate::application::config::VisionConfig;
use crate::domain::model::VisionModel;
use crate::infra::openai::OpenAiVisionClient;
use crate::presentation::handlers::{self, VisionAppState};
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::post};
use platform::rate_limit::{MemoryRateLimiter, RateLimitStore};
use session::{MemorySessionStore, SessionRepository};
use std::sync::Arc;

/// Create the vision router with the in-memory stores and the HTTP model client
pub fn vision_router(
    sessions: Arc<MemorySessionStore>,
    limiter: Arc<MemoryRateLimiter>,
    model: OpenAiVisionClient,
    config: VisionConfig,
) -> Router {
    vision_router_generic(sessions, limiter, Arc::new(model), config)
}

/// Create a vision router for any store/model implementation
pub fn vision_router_generic<R, L, M>(
    sessions: Arc<R>,
    limiter: Arc<L>,
    model: Arc<M>,
    config: VisionConfig,
) -> Router
where
    R: SessionRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
    M: VisionModel + Send + Sync + 'static,
{
    let body_limit = config.max_body_bytes;
    let state = VisionAppState {
        sessions,
        limiter,
        model,
        config: Arc::new(config),
    };

    Router::new()
        .route("/vision", post(handlers::analyze::<R, L, M>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

//! Session Router

use crate::application::config::SessionConfig;
use crate::domain::repository::SessionRepository;
use crate::infra::memory::MemorySessionStore;
use crate::presentation::handlers::{self, SessionAppState};
use crate::presentation::middleware::sweep_expired_sessions;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

/// Create the session router backed by the in-memory store
pub fn session_router(store: Arc<MemorySessionStore>, config: SessionConfig) -> Router {
    session_router_generic(store, config)
}

/// Create a session router for any repository implementation
///
/// Every request sweeps expired sessions before reaching its handler.
pub fn session_router_generic<R>(repo: Arc<R>, config: SessionConfig) -> Router
where
    R: SessionRepository + Send + Sync + 'static,
{
    let state = SessionAppState {
        repo: repo.clone(),
        config: Arc::new(config),
    };

    Router::new()
        .route("/claim", get(handlers::claim::<R>))
        .route("/heartbeat", post(handlers::heartbeat::<R>))
        .route("/release", post(handlers::release::<R>))
        .layer(middleware::from_fn_with_state(
            repo,
            sweep_expired_sessions::<R>,
        ))
        .with_state(state)
}

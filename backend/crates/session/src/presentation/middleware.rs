//! Session Middleware

use crate::domain::repository::SessionRepository;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

/// Middleware that sweeps expired sessions before the request is handled
///
/// Sweep failures are logged and never block the request.
pub async fn sweep_expired_sessions<R>(
    State(repo): State<Arc<R>>,
    req: Request,
    next: Next,
) -> Response
where
    R: SessionRepository + Send + Sync + 'static,
{
    match repo.sweep(platform::now_ms()).await {
        Ok(0) => {}
        Ok(removed) => tracing::debug!(removed, "Swept expired sessions"),
        Err(e) => tracing::warn!(error = %e, "Session sweep failed"),
    }

    next.run(req).await
}

//! Router Composition

use crate::config::ServerConfig;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use platform::rate_limit::MemoryRateLimiter;
use schedule::schedule_router;
use serde::Serialize;
use session::middleware::sweep_expired_sessions;
use session::{MemorySessionStore, SessionRepository, session_router};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vision::{OpenAiVisionClient, vision_router};

/// Process-wide stores, created once at startup
#[derive(Clone)]
pub struct Stores {
    pub sessions: Arc<MemorySessionStore>,
    pub limiter: Arc<MemoryRateLimiter>,
}

impl Stores {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            sessions: Arc::new(MemorySessionStore::new(&config.session)),
            limiter: Arc::new(MemoryRateLimiter::new()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    active_sessions: usize,
}

async fn health(State(sessions): State<Arc<MemorySessionStore>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        active_sessions: sessions.len(),
    })
}

/// Drop elapsed rate limit windows before the request is handled
async fn prune_rate_limits(
    State(limiter): State<Arc<MemoryRateLimiter>>,
    req: Request,
    next: Next,
) -> Response {
    let dropped = limiter.cleanup(platform::now_ms());
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped expired rate limit windows");
    }
    next.run(req).await
}

/// Full application router
///
/// Every route sweeps expired sessions and rate limit windows first; the
/// session routes carry their own session sweep layer.
pub fn build_app(config: &ServerConfig, stores: &Stores, model: OpenAiVisionClient) -> Router {
    let swept = Router::new()
        .route("/health", get(health))
        .with_state(stores.sessions.clone())
        .merge(vision_router(
            stores.sessions.clone(),
            stores.limiter.clone(),
            model,
            config.vision.clone(),
        ))
        .merge(schedule_router(config.schedule.clone()))
        .layer(middleware::from_fn_with_state(
            stores.sessions.clone(),
            sweep_expired_sessions::<MemorySessionStore>,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest(
            "/api/session",
            session_router(stores.sessions.clone(), config.session.clone()),
        )
        .merge(swept)
        .layer(middleware::from_fn_with_state(
            stores.limiter.clone(),
            prune_rate_limits,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Periodically drop expired sessions and stale rate-limit windows
pub fn spawn_sweeper(stores: Stores, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // First tick fires immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let now = platform::now_ms();
            match stores.sessions.sweep(now).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Background sweep removed sessions"),
                Err(e) => tracing::warn!(error = %e, "Background session sweep failed"),
            }
            let windows = stores.limiter.cleanup(now);
            if windows > 0 {
                tracing::debug!(windows, "Dropped expired rate limit windows");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{Request, StatusCode, header};
    use platform::client::ClientFingerprint;
    use platform::rate_limit::RateLimitConfig;
    use serde_json::Value;
    use std::net::SocketAddr;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app(dir: &TempDir) -> (Router, Stores) {
        let mut config = ServerConfig::from_lookup(|_| None).unwrap();
        config.schedule.path = dir.path().join("schedule.json");
        let stores = Stores::new(&config);
        let model = OpenAiVisionClient::new(&config.vision).unwrap();
        let app = build_app(&config, &stores, model)
            .layer(MockConnectInfo(SocketAddr::from(([192, 168, 1, 9], 7000))));
        (app, stores)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_counts_sessions() {
        let dir = TempDir::new().unwrap();
        let (app, _) = test_app(&dir);

        let (status, body) = send(
            &app,
            Request::builder().uri("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["activeSessions"], 0);

        let (status, _) = send(
            &app,
            Request::builder()
                .uri("/api/session/claim")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(
            &app,
            Request::builder().uri("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(body["activeSessions"], 1);
    }

    #[tokio::test]
    async fn test_vision_without_upstream_key() {
        let dir = TempDir::new().unwrap();
        let (app, _) = test_app(&dir);

        let (_, claim) = send(
            &app,
            Request::builder()
                .uri("/api/session/claim")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        let key = claim["sessionKey"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/vision")
                .header("X-Session-Key", key)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"image":"aGVsbG8="}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_schedule_is_mounted() {
        let dir = TempDir::new().unwrap();
        let (app, _) = test_app(&dir);

        let (status, body) = send(
            &app,
            Request::builder()
                .uri("/ncom/schedule")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["schedule"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let dir = TempDir::new().unwrap();
        let (app, _) = test_app(&dir);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    /// Ten minutes in the past: stale for the 5 minute session timeout
    fn stale_now() -> i64 {
        platform::now_ms() - 600_000
    }

    async fn seed_stale_state(stores: &Stores) {
        for ua in ["a", "b", "c"] {
            stores
                .sessions
                .claim(&ClientFingerprint::derive("", ua, "10.1.1.1"), stale_now())
                .await
                .unwrap();
        }
        stores.limiter.check(
            "203.0.113.5",
            &RateLimitConfig::new(10, Duration::from_secs(60)),
            stale_now(),
        );
        assert_eq!(stores.sessions.len(), 3);
        assert_eq!(stores.limiter.len(), 1);
    }

    #[tokio::test]
    async fn test_request_prunes_expired_state() {
        let dir = TempDir::new().unwrap();
        let (app, stores) = test_app(&dir);
        seed_stale_state(&stores).await;

        let (status, body) = send(
            &app,
            Request::builder().uri("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["activeSessions"], 0);
        assert_eq!(stores.sessions.len(), 0);
        assert_eq!(stores.limiter.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_sweeper() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        let stores = Stores::new(&config);
        seed_stale_state(&stores).await;

        let period = Duration::from_secs(60);
        let sweeper = spawn_sweeper(stores.clone(), period);

        // The first immediate tick is skipped
        tokio::time::sleep(period / 2).await;
        assert_eq!(stores.sessions.len(), 3);

        tokio::time::sleep(period).await;
        assert_eq!(stores.sessions.len(), 0);
        assert_eq!(stores.limiter.len(), 0);

        sweeper.abort();
    }
}

//! Schedule Router

use crate::application::ScheduleLock;
use crate::application::config::ScheduleConfig;
use crate::domain::repository::ScheduleRepository;
use crate::infra::file::FileScheduleStore;
use crate::presentation::handlers::{self, ScheduleAppState};
use axum::{Router, routing::get};
use std::sync::Arc;

pub const SCHEDULE_PATH: &str = "/ncom/schedule";

/// Create the schedule router backed by the JSON file at `config.path`
pub fn schedule_router(config: ScheduleConfig) -> Router {
    let store = FileScheduleStore::new(config.path.clone());
    schedule_router_generic(Arc::new(store), config)
}

/// Create a schedule router for any repository implementation
pub fn schedule_router_generic<R>(repo: Arc<R>, config: ScheduleConfig) -> Router
where
    R: ScheduleRepository + Send + Sync + 'static,
{
    let state = ScheduleAppState {
        repo,
        lock: Arc::new(ScheduleLock::new(())),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            SCHEDULE_PATH,
            get(handlers::get_schedule::<R>).post(handlers::replace_schedule::<R>),
        )
        .with_state(state)
}

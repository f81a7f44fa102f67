//! HTTP Handlers

use crate::application::config::ScheduleConfig;
use crate::application::{GetScheduleUseCase, ReplaceScheduleUseCase, ScheduleLock, parse_entries};
use crate::domain::entities::ScheduleDocument;
use crate::domain::repository::ScheduleRepository;
use crate::error::{ScheduleError, ScheduleResult};
use crate::presentation::dto::ReplaceScheduleResponse;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use std::sync::Arc;

/// Shared state for schedule handlers
pub struct ScheduleAppState<R>
where
    R: ScheduleRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub lock: Arc<ScheduleLock>,
    pub config: Arc<ScheduleConfig>,
}

impl<R> Clone for ScheduleAppState<R>
where
    R: ScheduleRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            lock: self.lock.clone(),
            config: self.config.clone(),
        }
    }
}

/// GET /ncom/schedule
pub async fn get_schedule<R>(
    State(state): State<ScheduleAppState<R>>,
) -> ScheduleResult<Json<ScheduleDocument>>
where
    R: ScheduleRepository + Send + Sync + 'static,
{
    let use_case = GetScheduleUseCase::new(
        state.repo.clone(),
        state.lock.clone(),
        state.config.clone(),
    );
    let document = use_case.execute(platform::now_ms()).await?;
    Ok(Json(document))
}

/// POST /ncom/schedule
pub async fn replace_schedule<R>(
    State(state): State<ScheduleAppState<R>>,
    body: Bytes,
) -> ScheduleResult<Json<ReplaceScheduleResponse>>
where
    R: ScheduleRepository + Send + Sync + 'static,
{
    let value = serde_json::from_slice(&body)
        .map_err(|e| ScheduleError::MalformedInput(format!("invalid JSON body: {}", e)))?;
    let entries = parse_entries(value)?;

    let use_case = ReplaceScheduleUseCase::new(state.repo.clone(), state.lock.clone());
    let document = use_case.execute(entries, platform::now_ms()).await?;

    Ok(Json(ReplaceScheduleResponse {
        success: true,
        document,
    }))
}

//! Replace Schedule Use Case

use crate::application::ScheduleLock;
use crate::domain::entities::{ScheduleDocument, ScheduleEntry};
use crate::domain::repository::ScheduleRepository;
use crate::error::{ScheduleError, ScheduleResult};
use serde_json::Value;
use std::sync::Arc;

/// Accepts the bare entry array, or a document object carrying `schedule`
pub fn parse_entries(body: Value) -> ScheduleResult<Vec<ScheduleEntry>> {
    let list = match body {
        Value::Array(list) => list,
        Value::Object(mut map) => match map.remove("schedule") {
            Some(Value::Array(list)) => list,
            _ => {
                return Err(ScheduleError::MalformedInput(
                    "schedule must be an array".to_string(),
                ));
            }
        },
        _ => {
            return Err(ScheduleError::MalformedInput(
                "schedule must be an array".to_string(),
            ));
        }
    };

    list.into_iter()
        .enumerate()
        .map(|(i, entry)| {
            serde_json::from_value(entry)
                .map_err(|e| ScheduleError::MalformedInput(format!("entry {}: {}", i, e)))
        })
        .collect()
}

/// Replace Schedule Use Case
pub struct ReplaceScheduleUseCase<R>
where
    R: ScheduleRepository,
{
    repo: Arc<R>,
    lock: Arc<ScheduleLock>,
}

impl<R> ReplaceScheduleUseCase<R>
where
    R: ScheduleRepository,
{
    pub fn new(repo: Arc<R>, lock: Arc<ScheduleLock>) -> Self {
        Self { repo, lock }
    }

    /// Store `entries` in the given order with a new refresh time
    pub async fn execute(
        &self,
        entries: Vec<ScheduleEntry>,
        now_ms: i64,
    ) -> ScheduleResult<ScheduleDocument> {
        let _guard = self.lock.lock().await;

        let document = ScheduleDocument::new(entries, now_ms, &mut rand::rng());
        self.repo.save(&document).await?;

        tracing::info!(
            entries = document.schedule.len(),
            next_refresh = document.next_refresh,
            "Schedule replaced"
        );
        Ok(document)
    }
}

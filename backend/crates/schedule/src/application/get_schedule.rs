//! Get Schedule Use Case

use crate::application::ScheduleLock;
use crate::application::config::ScheduleConfig;
use crate::domain::entities::{ScheduleDocument, StoredSchedule, default_schedule};
use crate::domain::repository::ScheduleRepository;
use crate::error::ScheduleResult;
use std::sync::Arc;

/// Get Schedule Use Case
///
/// Returns the current document, first bringing it up to date: a missing
/// file becomes the default schedule, a legacy array gains `nextRefresh`,
/// and a due document is rotated. Any such change is persisted before the
/// document is returned.
pub struct GetScheduleUseCase<R>
where
    R: ScheduleRepository,
{
    repo: Arc<R>,
    lock: Arc<ScheduleLock>,
    config: Arc<ScheduleConfig>,
}

impl<R> GetScheduleUseCase<R>
where
    R: ScheduleRepository,
{
    pub fn new(repo: Arc<R>, lock: Arc<ScheduleLock>, config: Arc<ScheduleConfig>) -> Self {
        Self { repo, lock, config }
    }

    pub async fn execute(&self, now_ms: i64) -> ScheduleResult<ScheduleDocument> {
        let _guard = self.lock.lock().await;

        let (mut document, mut dirty) = match self.repo.load().await? {
            Some(StoredSchedule::Document(document)) => (document, false),
            Some(StoredSchedule::Legacy(entries)) => {
                tracing::info!(entries = entries.len(), "Migrating legacy schedule file");
                (ScheduleDocument::new(entries, now_ms, &mut rand::rng()), true)
            }
            None => {
                tracing::info!(
                    entries = self.config.default_entries,
                    "No schedule stored, writing default"
                );
                let entries = default_schedule(self.config.default_entries);
                (ScheduleDocument::new(entries, now_ms, &mut rand::rng()), true)
            }
        };

        if document.is_due(now_ms) {
            document.rotate(now_ms, &mut rand::rng());
            tracing::info!(next_refresh = document.next_refresh, "Schedule rotated");
            dirty = true;
        }

        if dirty {
            self.repo.save(&document).await?;
        }

        Ok(document)
    }
}

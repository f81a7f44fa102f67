//! Repository Traits

use crate::domain::entities::{ScheduleDocument, StoredSchedule};
use crate::error::ScheduleResult;

/// Schedule persistence
///
/// Callers serialise read-modify-write cycles; implementations only need
/// each `save` to replace the stored document atomically.
#[trait_variant::make(ScheduleRepository: Send)]
pub trait LocalScheduleRepository {
    /// `None` when nothing has been stored yet
    async fn load(&self) -> ScheduleResult<Option<StoredSchedule>>;

    async fn save(&self, document: &ScheduleDocument) -> ScheduleResult<()>;
}

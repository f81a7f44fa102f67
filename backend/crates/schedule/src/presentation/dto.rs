//! Data Transfer Objects

use crate::domain::entities::ScheduleDocument;
use serde::Serialize;

/// Replace schedule response
#[derive(Debug, Serialize)]
pub struct ReplaceScheduleResponse {
    pub success: bool,
    #[serde(flatten)]
    pub document: ScheduleDocument,
}

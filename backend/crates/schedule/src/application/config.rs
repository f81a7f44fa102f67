//! Application Configuration

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// JSON file holding the document
    pub path: PathBuf,
    /// Size of the schedule written when no file exists yet
    pub default_entries: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/schedule.json"),
            default_entries: 5,
        }
    }
}

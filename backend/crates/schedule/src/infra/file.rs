//! JSON File Schedule Store

use crate::domain::entities::{ScheduleDocument, StoredSchedule};
use crate::domain::repository::ScheduleRepository;
use crate::error::{ScheduleError, ScheduleResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Schedule kept in one pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct FileScheduleStore {
    path: PathBuf,
}

impl FileScheduleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "schedule.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persistence_error(&self, action: &str, err: impl std::fmt::Display) -> ScheduleError {
        ScheduleError::Persistence(format!("{} {}: {}", action, self.path.display(), err))
    }
}

impl ScheduleRepository for FileScheduleStore {
    async fn load(&self) -> ScheduleResult<Option<StoredSchedule>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.persistence_error("read", e)),
        };

        let stored = serde_json::from_slice(&raw).map_err(|e| self.persistence_error("parse", e))?;
        Ok(Some(stored))
    }

    async fn save(&self, document: &ScheduleDocument) -> ScheduleResult<()> {
        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| self.persistence_error("serialize", e))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| self.persistence_error("create directory for", e))?;
        }

        // Readers never see a half-written file
        let temp = self.temp_path();
        fs::write(&temp, &json)
            .await
            .map_err(|e| self.persistence_error("write", e))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.persistence_error("replace", e))?;

        tracing::debug!(
            path = %self.path.display(),
            entries = document.schedule.len(),
            next_refresh = document.next_refresh,
            "Schedule saved"
        );
        Ok(())
    }
}

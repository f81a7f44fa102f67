//! Application Configuration
//!
//! Configuration for the session application layer.

use std::time::Duration;

/// Session application configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Idle time after which a session expires
    pub session_timeout: Duration,
    /// Maximum number of stored sessions
    pub max_sessions: usize,
    /// Heartbeat cadence suggested to clients
    pub heartbeat_interval: Duration,
    /// Period of the background sweep task, `None` to disable it
    pub sweep_interval: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_timeout: Duration::from_millis(300_000),
            max_sessions: 100,
            heartbeat_interval: Duration::from_millis(60_000),
            sweep_interval: Some(Duration::from_secs(60)),
        }
    }
}

impl SessionConfig {
    pub fn session_timeout_ms(&self) -> i64 {
        i64::try_from(self.session_timeout.as_millis()).unwrap_or(i64::MAX)
    }

    pub fn heartbeat_interval_ms(&self) -> i64 {
        i64::try_from(self.heartbeat_interval.as_millis()).unwrap_or(i64::MAX)
    }
}

//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;

/// Response for GET /api/session/claim
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub success: bool,
    pub session_key: String,
    /// ISO-8601, millisecond precision, UTC
    pub expires_at: String,
    pub heartbeat_interval: i64,
    pub reused: bool,
}

/// Response for POST /api/session/heartbeat
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatResponse {
    pub success: bool,
    pub expires_at: String,
}

/// Response for POST /api/session/release
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseResponse {
    pub success: bool,
}

/// Format epoch milliseconds as `2024-01-01T00:00:00.000Z`
pub fn to_iso8601(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

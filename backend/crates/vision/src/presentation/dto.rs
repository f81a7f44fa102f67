//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request for POST /vision
#[derive(Debug, Clone, Deserialize)]
pub struct VisionRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Response for POST /vision
#[derive(Debug, Clone, Serialize)]
pub struct VisionResponse {
    pub success: bool,
    pub analysis: String,
    pub model: String,
    pub usage: Option<Value>,
    /// ISO-8601 time the answer was produced
    pub timestamp: String,
}

//! Application Configuration
//!
//! Configuration for the vision application layer.

use platform::rate_limit::RateLimitConfig;
use std::time::Duration;

/// Base64 photos are about 4/3 of their file size
pub const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

pub const DEFAULT_PROMPT: &str =
    "Describe what you see in this image in detail. Include objects, people, text, and context.";

/// Vision application configuration
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Base URL of an OpenAI-compatible API (no trailing slash)
    pub api_base_url: String,
    /// Shared upstream API key; `None` disables the endpoint
    pub api_key: Option<String>,
    /// Model used when the request names none
    pub default_model: String,
    /// Prompt used when the request carries none
    pub default_prompt: String,
    pub max_tokens: u32,
    /// Bound on the whole upstream call
    pub request_timeout: Duration,
    /// Per-client request budget
    pub rate_limit: RateLimitConfig,
    /// Largest accepted `/vision` request body
    pub max_body_bytes: usize,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            default_model: "gpt-4o-mini".to_string(),
            default_prompt: DEFAULT_PROMPT.to_string(),
            max_tokens: 1000,
            request_timeout: Duration::from_secs(30),
            rate_limit: RateLimitConfig::new(10, Duration::from_millis(60_000)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl VisionConfig {
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'))
    }
}

//! OpenAI-compatible Vision Client
//!
//! Sends one chat-completions request per analysis with the image attached
//! as an `image_url` content part.

use crate::application::config::VisionConfig;
use crate::domain::model::{Analysis, AnalysisRequest, VisionModel};
use crate::error::{VisionError, VisionResult};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

/// Upstream error bodies are logged up to this many characters
const MAX_LOGGED_BODY_CHARS: usize = 512;

/// Vision model reached over HTTP
#[derive(Debug, Clone)]
pub struct OpenAiVisionClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiVisionClient {
    /// Build a client whose every call is bounded by `config.request_timeout`
    pub fn new(config: &VisionConfig) -> VisionResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| VisionError::Upstream(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.chat_completions_url(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Request body for `POST /chat/completions`
pub fn build_request_body(request: &AnalysisRequest) -> Value {
    json!({
        "model": request.model,
        "max_tokens": request.max_tokens,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": request.prompt },
                { "type": "image_url", "image_url": { "url": request.image_url } }
            ]
        }]
    })
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull the answer out of a chat-completions response body
pub fn parse_completion(body: &str, requested_model: &str) -> VisionResult<Analysis> {
    let completion: ChatCompletion = serde_json::from_str(body)
        .map_err(|e| VisionError::Upstream(format!("unexpected response shape: {}", e)))?;

    let text = completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| VisionError::Upstream("response contained no analysis".to_string()))?;

    Ok(Analysis {
        text,
        model: completion
            .model
            .unwrap_or_else(|| requested_model.to_string()),
        usage: completion.usage,
    })
}

impl VisionModel for OpenAiVisionClient {
    async fn analyze(&self, request: &AnalysisRequest) -> VisionResult<Analysis> {
        let api_key = self.api_key.as_deref().ok_or(VisionError::NotConfigured)?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&build_request_body(request))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let excerpt: String = body.chars().take(MAX_LOGGED_BODY_CHARS).collect();
            tracing::warn!(status = %status, body = %excerpt, "Vision upstream returned error");
            return Err(VisionError::Upstream(format!(
                "upstream returned status {}",
                status.as_u16()
            )));
        }

        parse_completion(&body, &request.model)
    }
}

fn map_transport_error(err: reqwest::Error) -> VisionError {
    if err.is_timeout() {
        VisionError::UpstreamTimeout
    } else {
        VisionError::Upstream(format!("request to vision model failed: {}", err))
    }
}

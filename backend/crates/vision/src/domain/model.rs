//! Vision Model
//!
//! The external model is a collaborator behind [`VisionModel`]; the gate
//! only decides whether it gets called.

use crate::error::VisionResult;
use serde_json::Value;

/// One analysis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// `data:` or `http(s)://` URL of the image
    pub image_url: String,
    pub prompt: String,
    pub model: String,
    pub max_tokens: u32,
}

/// Model answer
#[derive(Debug, Clone)]
pub struct Analysis {
    pub text: String,
    /// Model that actually answered, as reported upstream
    pub model: String,
    /// Token accounting in the provider's own shape
    pub usage: Option<Value>,
}

/// External vision model
#[trait_variant::make(VisionModel: Send)]
pub trait LocalVisionModel {
    async fn analyze(&self, request: &AnalysisRequest) -> VisionResult<Analysis>;
}

//! Analyze Image Use Case

use crate::application::config::VisionConfig;
use crate::domain::image::normalize_image;
use crate::domain::model::{Analysis, AnalysisRequest, VisionModel};
use crate::error::{VisionError, VisionResult};
use std::sync::Arc;

/// Input DTO for analyze image
#[derive(Debug, Clone, Default)]
pub struct AnalyzeImageInput {
    pub image: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
}

/// Analyze Image Use Case
pub struct AnalyzeImageUseCase<M>
where
    M: VisionModel,
{
    model: Arc<M>,
    config: Arc<VisionConfig>,
}

impl<M> AnalyzeImageUseCase<M>
where
    M: VisionModel,
{
    pub fn new(model: Arc<M>, config: Arc<VisionConfig>) -> Self {
        Self { model, config }
    }

    pub async fn execute(&self, input: AnalyzeImageInput) -> VisionResult<Analysis> {
        let raw_image = input.image.ok_or(VisionError::MissingImage)?;
        let image_url = normalize_image(&raw_image)?;

        let request = AnalysisRequest {
            image_url,
            prompt: non_blank(input.prompt).unwrap_or_else(|| self.config.default_prompt.clone()),
            model: non_blank(input.model).unwrap_or_else(|| self.config.default_model.clone()),
            max_tokens: self.config.max_tokens,
        };

        let started = std::time::Instant::now();
        let analysis = self.model.analyze(&request).await?;

        tracing::info!(
            model = %analysis.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Vision analysis completed"
        );

        Ok(analysis)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

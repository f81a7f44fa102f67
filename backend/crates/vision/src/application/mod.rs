//! Application Layer - Use Cases

pub mod analyze_image;
pub mod authorize;
pub mod config;

pub use analyze_image::{AnalyzeImageInput, AnalyzeImageUseCase};
pub use authorize::VisionGate;

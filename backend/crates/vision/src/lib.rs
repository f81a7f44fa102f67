//! Vision Proxy Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Vision model trait and request/response values
//! - `application/` - Authorization gate and analysis use case
//! - `infra/` - OpenAI-compatible upstream client
//! - `presentation/` - HTTP handler, DTOs, router
//!
//! ## Authorization Order
//! 1. A valid session bound to the caller's fingerprint (401 otherwise)
//! 2. The per-client fixed-window rate limit (429 otherwise)
//! 3. Only then the request body is inspected and the model invoked

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::VisionConfig;
pub use domain::model::VisionModel;
pub use error::{VisionError, VisionResult};
pub use infra::openai::OpenAiVisionClient;
pub use presentation::router::{vision_router, vision_router_generic};

//! Domain Layer
//!
//! - Vision model trait (the external collaborator seam)
//! - Analysis request/response values
//! - Image source normalisation

pub mod image;
pub mod model;

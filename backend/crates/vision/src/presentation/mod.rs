//! Presentation Layer
//!
//! HTTP handler and DTOs for the vision API.

pub mod dto;
pub mod handlers;
pub mod router;

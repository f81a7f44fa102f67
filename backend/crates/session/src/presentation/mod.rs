//! Presentation Layer
//!
//! HTTP handlers and DTOs for the session API.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::{SESSION_KEY_HEADER, extract_session_key};

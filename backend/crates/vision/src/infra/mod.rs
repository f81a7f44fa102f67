//! Infrastructure Layer
//!
//! Upstream model clients.

pub mod openai;

//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every bounded context agrees on:
//! - The unified error type, its classification and result alias
//! - The JSON error body returned to HTTP clients
//!
//! Session, vision and schedule crates define their own error enums and
//! convert them into [`error::app_error::AppError`] at the HTTP boundary.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}

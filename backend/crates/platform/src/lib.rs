//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client identification (IP extraction, request fingerprint)
//! - Cryptographic utilities (secure random bytes, SHA-256, hex)
//! - Fixed-window rate limiting

pub mod client;
pub mod crypto;
pub mod rate_limit;

/// Current wall-clock time as Unix epoch milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

//! Session Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entity, value objects, repository trait
//! - `application/` - Use cases (claim, heartbeat, release, validate)
//! - `infra/` - Process-local session table
//! - `presentation/` - HTTP handlers, DTOs, sweep middleware, router
//!
//! ## Session Model
//! - Anonymous clients are identified by a request fingerprint only
//! - A session key is a 256-bit random bearer token
//! - At most one live session per fingerprint; claiming again reuses it
//! - Expiry is lazy (checked on access) plus a sweep on every request
//! - The table is bounded; claims beyond capacity are rejected

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SessionConfig;
pub use domain::repository::SessionRepository;
pub use domain::value_objects::{SessionKey, ValidationStatus};
pub use error::{SessionError, SessionResult};
pub use infra::memory::MemorySessionStore;
pub use presentation::router::{session_router, session_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod claim_session;
pub mod config;
pub mod heartbeat;
pub mod release_session;
pub mod validate_session;

pub use claim_session::{ClaimSessionOutput, ClaimSessionUseCase};
pub use heartbeat::{HeartbeatOutput, HeartbeatUseCase};
pub use release_session::ReleaseSessionUseCase;
pub use validate_session::ValidateSessionUseCase;

//! Application Layer - Use Cases

pub mod config;
pub mod get_schedule;
pub mod replace_schedule;

pub use get_schedule::GetScheduleUseCase;
pub use replace_schedule::{ReplaceScheduleUseCase, parse_entries};

/// Serialises read-modify-write cycles on the stored document
pub type ScheduleLock = tokio::sync::Mutex<()>;

//! Content Schedule Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Schedule document, rotation rules, repository trait
//! - `application/` - Read-with-rotation and replace use cases
//! - `infra/` - JSON file store
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Rotation
//! - The document carries `nextRefresh` (epoch ms)
//! - A read at or after `nextRefresh` shuffles the entries and draws a new
//!   refresh time from {1h, 5h, 24h}
//! - A replace always draws a new refresh time

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ScheduleConfig;
pub use domain::entities::{ScheduleDocument, ScheduleEntry};
pub use domain::repository::ScheduleRepository;
pub use error::{ScheduleError, ScheduleResult};
pub use infra::file::FileScheduleStore;
pub use presentation::router::{schedule_router, schedule_router_generic};

#[cfg(test)]
mod tests;

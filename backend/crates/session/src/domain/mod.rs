//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Session)
//! - Domain value objects (SessionKey, ClientFingerprint, ValidationStatus)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;

//! Infrastructure Layer
//!
//! Storage backends for the session table.

pub mod memory;

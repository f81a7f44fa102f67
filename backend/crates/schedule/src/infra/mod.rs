//! Infrastructure Layer

pub mod file;

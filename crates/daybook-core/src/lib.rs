//! Core abstractions for Daybook: record types and repository contracts.
//! This crate is intentionally small to keep dependency surface minimal.

pub mod memory;
pub mod records;
pub mod repo;

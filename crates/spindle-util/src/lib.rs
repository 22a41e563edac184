//! Shared utilities for the Spindle build companion.
//!
//! This crate provides cross-cutting concerns used by all other Spindle
//! crates: error types, filesystem helpers, cryptographic hashing, and
//! terminal progress indicators.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;

//! Shared utilities for depcheck.
//!
//! This crate provides cross-cutting concerns used by the other depcheck
//! crates: the unified error type and terminal status lines.

pub mod errors;
pub mod progress;

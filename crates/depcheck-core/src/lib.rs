//! Core data types for depcheck.
//!
//! This crate defines what the resolver works on: component types and
//! compatibility records, the immutable catalog, the declarative TOML source
//! it is built from, the selection state with its on-disk form, and the
//! project configuration.
//!
//! This crate performs no prompting and holds no resolution logic.

pub mod catalog;
pub mod component;
pub mod config;
pub mod selection;
pub mod source;

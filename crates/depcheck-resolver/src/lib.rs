//! Resolution engine: the conflict predicate, forced-modification lookups,
//! and the dependency manager that keeps an era, a scenario and a set of
//! modifications mutually compatible after every change.

pub mod conflict;
pub mod manager;
pub mod prompt;
pub mod requirements;

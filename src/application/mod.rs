//! Application layer - Commands and Handlers.
//!
//! Handlers orchestrate domain operations and coordinate between ports.
//! Each one is built with its dependencies and exposes a single `handle`.

pub mod emails;
pub mod handlers;

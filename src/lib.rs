//! Code of Shiksha Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
/// Content models and the in-memory document store
pub mod content;
pub mod error;
pub mod tutor;

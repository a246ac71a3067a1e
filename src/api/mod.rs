//! API module
//!
//! Contains HTTP request handlers for the tutor and content endpoints

pub mod chat;
pub mod content;
pub mod state;
pub mod streaming;
pub mod utils;

pub use state::{AppState, SharedState};

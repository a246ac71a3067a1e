//! Content management
//!
//! Data models for academic subjects and placement problems, plus the
//! in-memory document store the API handlers operate on.

pub mod models;
pub mod store;

pub use models::{Difficulty, Problem, Subject, Unit};
pub use store::{ContentStore, Document, StoreError, PROBLEMS_COLLECTION, SUBJECTS_COLLECTION};

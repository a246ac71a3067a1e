//! Shared application state
//!
//! One tutor session, its visible transcript, and the content store, shared
//! across handlers. The session enforces nothing about concurrent sends;
//! keeping one send outstanding at a time is the caller's job, and the
//! single-user admin/student UI this serves already does that.

use crate::config::TutorConfig;
use crate::content::ContentStore;
use crate::tutor::{ChatSession, Transcript, UpstreamClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Application state shared by all handlers
pub struct AppState {
    /// The tutor chat session
    pub session: ChatSession,
    /// Server-side copy of the visible message list
    pub transcript: Mutex<Transcript>,
    /// Subjects and placement problems
    pub store: ContentStore,
}

/// Handler-facing alias for the shared state
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build the state from tutor configuration
    pub fn new(config: &TutorConfig) -> Self {
        let client = UpstreamClient::with_base_url(
            config.api_key.clone(),
            Some(config.model.clone()),
            config.base_url.clone(),
        );
        Self {
            session: ChatSession::new(client, Duration::from_millis(config.min_interval_ms)),
            transcript: Mutex::new(Transcript::new()),
            store: ContentStore::new(),
        }
    }
}

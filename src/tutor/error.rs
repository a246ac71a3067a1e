//! Tutor-specific error types
//!
//! Errors that can occur while producing a tutor reply (local throttling,
//! upstream HTTP failures). Every variant is terminal for the current
//! message only; the session stays usable for the next send.

use thiserror::Error;

/// User-visible advisory shown when the local throttle rejects a send
pub const RATE_LIMITED_MESSAGE: &str = "Please wait a moment before sending another message.";

/// User-visible text for an upstream HTTP 429
pub const UPSTREAM_RATE_LIMITED_MESSAGE: &str =
    "Sorry, I'm receiving too many requests right now. Please wait a moment and try again. (Rate limit exceeded)";

/// User-visible text for any other upstream or transport failure
pub const UPSTREAM_UNAVAILABLE_MESSAGE: &str =
    "Sorry, I encountered an error. Please check your internet connection and try again.";

/// Errors that can occur during a tutor send
///
/// Malformed stream frames are deliberately not represented here: the
/// decoder recovers from them locally by skipping, they are never surfaced.
#[derive(Error, Debug)]
pub enum TutorError {
    /// Rejected by the local minimum-interval throttle; no network attempted
    #[error("request throttled locally: minimum interval is {min_interval_ms} ms")]
    RateLimited {
        /// Configured minimum interval between accepted sends
        min_interval_ms: u64,
    },

    /// Upstream service returned HTTP 429
    #[error("upstream rate limit exceeded (HTTP 429)")]
    UpstreamRateLimited,

    /// Upstream returned a non-OK status or the transport failed
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl TutorError {
    /// Map the error to the text rendered in place of the assistant bubble
    ///
    /// The three classes map to three distinct strings; callers render this
    /// instead of propagating the error past the send boundary.
    pub fn user_message(&self) -> &'static str {
        match self {
            TutorError::RateLimited { .. } => RATE_LIMITED_MESSAGE,
            TutorError::UpstreamRateLimited => UPSTREAM_RATE_LIMITED_MESSAGE,
            TutorError::UpstreamUnavailable(_) => UPSTREAM_UNAVAILABLE_MESSAGE,
        }
    }
}

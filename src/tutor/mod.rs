//! AI tutor core
//!
//! Everything needed to turn a student's question into a progressively
//! revealed answer: conversation history, response cache, local throttle,
//! static fallback knowledge base, the upstream streaming client, and the
//! session object that ties them together.

pub mod cache;
pub mod client;
pub mod error;
pub mod fallback;
pub mod history;
pub mod rate_limit;
pub mod session;
pub mod stream;
pub mod transcript;

pub use cache::{normalize_query, ResponseCache};
pub use client::UpstreamClient;
pub use error::TutorError;
pub use history::{ConversationHistory, Turn, TurnRole};
pub use rate_limit::MinIntervalLimiter;
pub use session::ChatSession;
pub use stream::{DeltaStream, ReplyStream};
pub use transcript::{ChatMessage, MessageRole, Transcript};

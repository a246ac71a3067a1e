//! Visible chat transcript
//!
//! The message list a client renders: append-only within a session, with
//! the streaming reply mutated in place by id as snapshots arrive. Distinct
//! from [`crate::tutor::history`], which is the upstream prompt context.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Who a transcript message is displayed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The student
    User,
    /// The tutor
    Model,
}

/// One visible chat bubble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique, ordering-stable identifier
    pub id: String,
    /// Sender
    pub role: MessageRole,
    /// Display text; mutable while the reply is streaming, fixed afterwards
    pub text: String,
    /// Creation time, epoch millis
    pub timestamp: i64,
}

/// Append-only message list with in-place text updates by id
///
/// Messages are never removed for the lifetime of the session; ids are a
/// monotonic counter, so insertion order and id order agree.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning its assigned id
    pub fn push(&mut self, role: MessageRole, text: String) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: id.clone(),
            role,
            text,
            timestamp: Utc::now().timestamp_millis(),
        });
        id
    }

    /// Replace the text of the message with the given id
    ///
    /// Used while streaming: each accumulated snapshot overwrites the
    /// previous one. Unknown ids are ignored.
    pub fn set_text(&mut self, id: &str, text: String) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
            message.text = text;
        }
    }

    /// All messages in insertion order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True if no messages have been appended
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

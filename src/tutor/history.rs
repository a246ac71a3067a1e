//! Conversation history
//!
//! Ordered role-tagged turns sent as context to the upstream model.
//! The system instruction is seeded lazily on first use so that `reset`
//! can simply clear the whole list.

use serde::{Deserialize, Serialize};

/// Persona instruction for the tutor, seeded as the first turn
pub const SYSTEM_INSTRUCTION: &str = "You are an expert AI tutor specialized in computer science, programming, data structures, algorithms, and AKTU syllabus. \
Provide clear, concise explanations with code examples when needed. Be helpful, friendly, and educational. \
Help students understand concepts deeply, not just provide answers.";

/// Role of a conversation turn, as sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Persona/system instruction
    System,
    /// Student input
    User,
    /// Model output
    Assistant,
}

/// One role-tagged turn of context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced this turn
    pub role: TurnRole,
    /// Turn text
    pub content: String,
}

/// Ordered conversation context for the upstream model
///
/// Invariant: either empty, or the first turn is the single system turn.
/// Turns are append-only between resets.
#[derive(Debug, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    /// Create an empty history (system turn is seeded on first push)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn, seeding the system instruction first if empty
    pub fn push_user(&mut self, content: String) {
        if self.turns.is_empty() {
            self.turns.push(Turn {
                role: TurnRole::System,
                content: SYSTEM_INSTRUCTION.to_string(),
            });
        }
        self.turns.push(Turn {
            role: TurnRole::User,
            content,
        });
    }

    /// Append an assistant turn
    pub fn push_assistant(&mut self, content: String) {
        self.turns.push(Turn {
            role: TurnRole::Assistant,
            content,
        });
    }

    /// All turns in insertion order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns, system turn included
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True if no turns have been recorded since construction or reset
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Clear all turns; the next `push_user` reseeds the system instruction
    pub fn reset(&mut self) {
        self.turns.clear();
    }
}

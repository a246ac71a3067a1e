//! Tutor chat API endpoints
//!
//! The HTTP surface over the chat session: send a message and stream the
//! reply as SSE, read back the transcript, reset the conversation.

use crate::api::state::SharedState;
use crate::api::streaming::sse_response;
use crate::api::utils::validate_message;
use crate::error::AppError;
use crate::tutor::{ChatMessage, MessageRole};
use axum::{extract::State, response::Response, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request to send a tutor message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The student's message
    pub message: String,
}

/// Response to a reset request
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Always true on success
    pub success: bool,
}

/// POST /api/tutor/chat - stream a reply for one message
///
/// Returns 200 with an SSE body in every case except request validation:
/// throttle rejections and upstream failures arrive as `[ERROR]`-prefixed
/// text frames so the client renders them in the reply bubble.
pub async fn tutor_chat(
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, AppError> {
    validate_message(&request.message)?;

    info!(message_len = request.message.len(), "Tutor chat request");

    // Transcript bookkeeping: the user's bubble plus an empty placeholder
    // the snapshots will fill in.
    let model_message_id = {
        let mut transcript = state.transcript.lock().await;
        transcript.push(MessageRole::User, request.message.clone());
        transcript.push(MessageRole::Model, String::new())
    };

    let reply = state.session.send(&request.message).await;
    sse_response(state, reply, model_message_id)
}

/// GET /api/tutor/transcript - the visible message list
pub async fn tutor_transcript(
    State(state): State<SharedState>,
) -> Json<Vec<ChatMessage>> {
    Json(state.transcript.lock().await.messages().to_vec())
}

/// POST /api/tutor/reset - clear the conversation context
///
/// Clears the upstream prompt history only; the response cache stays warm
/// and the transcript keeps its scrollback.
pub async fn tutor_reset(State(state): State<SharedState>) -> Json<ResetResponse> {
    state.session.reset().await;
    Json(ResetResponse { success: true })
}

//! Streaming utilities for Server-Sent Events (SSE)
//!
//! Exposes a tutor reply stream as an SSE HTTP response, mirroring each
//! snapshot into the server-side transcript as it goes. Failures become
//! user-visible text frames, never a failed response: by the time the
//! stream is open the client is already rendering a bubble for the reply.

use crate::api::state::SharedState;
use crate::error::AppError;
use crate::tutor::stream::DONE_SENTINEL;
use crate::tutor::{ReplyStream, TutorError};
use async_stream::stream;
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use futures_util::{Stream, StreamExt};

/// SSE error prefix, prepended to user-visible failure text
pub const SSE_ERROR_PREFIX: &str = "[ERROR]";

fn sse_frame(data: &str) -> String {
    // Payloads may span lines; SSE frames may not. Backslashes are escaped
    // first so a literal "\n" in the payload stays distinct from a newline.
    let escaped = data.replace('\\', "\\\\").replace('\n', "\\n");
    format!("data: {}\n\n", escaped)
}

/// Build the SSE response for a send outcome
///
/// `model_message_id` is the transcript placeholder whose text is replaced
/// by each snapshot (and by the error text on failure).
pub fn sse_response(
    state: SharedState,
    reply: Result<ReplyStream, TutorError>,
    model_message_id: String,
) -> Result<Response, AppError> {
    let event_stream = create_stream(state, reply, model_message_id);

    let body_stream = event_stream.map(Ok::<_, std::io::Error>);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build SSE response: {}", e)))
}

fn create_stream(
    state: SharedState,
    reply: Result<ReplyStream, TutorError>,
    model_message_id: String,
) -> impl Stream<Item = String> {
    stream! {
        match reply {
            Ok(mut snapshots) => {
                while let Some(item) = snapshots.next().await {
                    match item {
                        Ok(snapshot) => {
                            state
                                .transcript
                                .lock()
                                .await
                                .set_text(&model_message_id, snapshot.clone());
                            yield sse_frame(&snapshot);
                        }
                        Err(e) => {
                            let text = e.user_message();
                            state
                                .transcript
                                .lock()
                                .await
                                .set_text(&model_message_id, text.to_string());
                            yield sse_frame(&format!("{} {}", SSE_ERROR_PREFIX, text));
                            yield sse_frame(DONE_SENTINEL);
                            return;
                        }
                    }
                }
                yield sse_frame(DONE_SENTINEL);
            }
            Err(e) => {
                let text = e.user_message();
                state
                    .transcript
                    .lock()
                    .await
                    .set_text(&model_message_id, text.to_string());
                yield sse_frame(&format!("{} {}", SSE_ERROR_PREFIX, text));
                yield sse_frame(DONE_SENTINEL);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_frame_wraps_payload() {
        assert_eq!(sse_frame("hello"), "data: hello\n\n");
    }

    #[test]
    fn test_sse_frame_escapes_newlines() {
        assert_eq!(sse_frame("line one\nline two"), "data: line one\\nline two\n\n");
    }

    #[test]
    fn test_sse_frame_keeps_literal_backslash_n_distinct_from_newline() {
        // Code snippets often contain the two-character sequence \n.
        let with_literal = sse_frame(r"printf(\n)");
        let with_newline = sse_frame("printf(\n)");
        assert_ne!(with_literal, with_newline);
        assert_eq!(with_literal, "data: printf(\\\\n)\n\n");
        assert_eq!(with_newline, "data: printf(\\n)\n\n");
    }
}

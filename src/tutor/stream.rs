//! Upstream stream decoding
//!
//! Turns the wire-level response of the model endpoint into the one contract
//! the rest of the crate consumes: a lazy, finite, forward-only sequence of
//! accumulated-text snapshots. Two transports feed it:
//!
//! - raw server-sent events (`data: <json>` frames over a chunked body,
//!   terminated by a `data: [DONE]` sentinel), and
//! - any in-process stream of ready text chunks (cache and fallback hits,
//!   or an SDK-style iterator of objects carrying a text field).
//!
//! The tutor has been pointed at several providers over its lifetime, so the
//! decoder probes a fixed priority list of response shapes per frame rather
//! than committing to one schema.

use crate::tutor::error::TutorError;
use async_stream::stream;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use serde_json::Value;
use tracing::trace;

/// Raw text increments from the upstream, in arrival order
pub type DeltaStream = BoxStream<'static, Result<String, TutorError>>;

/// Accumulated-text snapshots; each item is the full reply so far
pub type ReplyStream = BoxStream<'static, Result<String, TutorError>>;

/// SSE frame payload prefix
const DATA_PREFIX: &str = "data: ";

/// SSE stream termination sentinel
pub const DONE_SENTINEL: &str = "[DONE]";

type DeltaExtractor = fn(&Value) -> Option<&str>;

/// Known response shapes, probed in priority order per frame
///
/// First non-empty result wins. The list is the complete policy for
/// tolerating provider swaps; adding a provider means adding an entry.
const EXTRACTORS: &[DeltaExtractor] = &[
    extract_choice_delta, // OpenAI / OpenRouter chat completion chunks
    extract_output,       // Bytez
    extract_generated_text,
    extract_text,
    extract_response,
];

fn extract_choice_delta(value: &Value) -> Option<&str> {
    value
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
}

fn extract_output(value: &Value) -> Option<&str> {
    value.get("output")?.as_str()
}

fn extract_generated_text(value: &Value) -> Option<&str> {
    value.get("generated_text")?.as_str()
}

fn extract_text(value: &Value) -> Option<&str> {
    value.get("text")?.as_str()
}

fn extract_response(value: &Value) -> Option<&str> {
    value.get("response")?.as_str()
}

/// Pull the incremental text out of a parsed frame, whatever its shape
pub fn extract_delta(value: &Value) -> Option<String> {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(value).filter(|text| !text.is_empty()))
        .map(str::to_string)
}

/// Outcome of decoding one `data:` payload
#[derive(Debug, PartialEq, Eq)]
pub enum FrameEvent {
    /// Incremental text to append
    Delta(String),
    /// Terminal sentinel; the stream is complete
    Done,
    /// Non-JSON payload or no known text field; recovered by ignoring
    Skip,
}

/// Decode a single frame payload (the part after `data: `)
pub fn decode_data(payload: &str) -> FrameEvent {
    if payload == DONE_SENTINEL {
        return FrameEvent::Done;
    }
    match serde_json::from_str::<Value>(payload) {
        Ok(value) => match extract_delta(&value) {
            Some(delta) => FrameEvent::Delta(delta),
            None => FrameEvent::Skip,
        },
        Err(_) => {
            trace!(payload_len = payload.len(), "Skipping non-JSON frame");
            FrameEvent::Skip
        }
    }
}

/// Reassembles `data:` payloads from arbitrarily-split body chunks
///
/// Frames may be cut anywhere by the transport; incomplete trailing lines
/// are held until the next chunk arrives.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    pending: String,
}

impl FrameBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one body chunk, returning the complete payloads it unlocked
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.push_str(&String::from_utf8_lossy(chunk));

        let mut payloads = Vec::new();
        while let Some(newline) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=newline).collect();
            let line = line.trim();
            if let Some(payload) = line.strip_prefix(DATA_PREFIX) {
                payloads.push(payload.to_string());
            }
        }
        payloads
    }
}

/// Decode an SSE response body into a stream of raw deltas
///
/// Malformed frames are skipped; the stream ends at the `[DONE]` sentinel
/// or at end of body. A transport error mid-stream is terminal and surfaces
/// as a single `UpstreamUnavailable` item.
pub fn sse_delta_stream(response: reqwest::Response) -> DeltaStream {
    Box::pin(stream! {
        let mut body = response.bytes_stream();
        let mut buffer = FrameBuffer::new();

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(TutorError::UpstreamUnavailable(e.to_string()));
                    return;
                }
            };

            for payload in buffer.push(&chunk) {
                match decode_data(&payload) {
                    FrameEvent::Delta(delta) => yield Ok(delta),
                    FrameEvent::Done => return,
                    FrameEvent::Skip => {}
                }
            }
        }
    })
}

/// Fold raw deltas into accumulated-text snapshots
///
/// Each non-empty delta yields the full text so far, so a consumer replaces
/// its displayed text instead of concatenating. Empty deltas produce no
/// snapshot; the sequence never re-decreases.
pub fn accumulate(mut deltas: DeltaStream) -> ReplyStream {
    Box::pin(stream! {
        let mut text = String::new();
        while let Some(item) = deltas.next().await {
            match item {
                Ok(delta) => {
                    if delta.is_empty() {
                        continue;
                    }
                    text.push_str(&delta);
                    yield Ok(text.clone());
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }
    })
}

/// A completed reply stream carrying one ready snapshot
///
/// Used for cache and fallback hits, which behave like an upstream stream
/// that produced its whole text in a single chunk.
pub fn single_chunk_stream(text: String) -> ReplyStream {
    Box::pin(futures_util::stream::once(async move { Ok(text) }))
}

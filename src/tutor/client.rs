//! Upstream model endpoint client
//!
//! Direct HTTP client for the OpenAI-compatible chat-completions endpoint
//! the tutor is pointed at. Opens the request with `stream: true` and hands
//! the body to the SSE decoder.

use crate::tutor::error::TutorError;
use crate::tutor::history::Turn;
use crate::tutor::stream::{sse_delta_stream, DeltaStream};
use serde::Serialize;
use tracing::{debug, error};

/// Default chat-completions endpoint (DeepSeek-hosted relay)
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";

/// Default model name
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Sampling temperature sent with every request
const TEMPERATURE: f32 = 0.7;

/// Completion length cap sent with every request
const MAX_TOKENS: u32 = 1000;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

/// HTTP client for the streaming chat endpoint
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl UpstreamClient {
    /// Create a client against the default endpoint
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL (also used by tests)
    pub fn with_base_url(api_key: String, model: Option<String>, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// Open a streaming completion for the given conversation context
    ///
    /// # Arguments
    /// * `turns` - Full conversation history, system turn first
    ///
    /// # Returns
    /// * `Ok(DeltaStream)` - Raw text increments as the model produces them
    /// * `Err(TutorError)` - `UpstreamRateLimited` on HTTP 429,
    ///   `UpstreamUnavailable` on any other non-OK status or transport failure
    pub async fn chat_stream(&self, turns: &[Turn]) -> Result<DeltaStream, TutorError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: turns,
            stream: true,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(
            url = %url,
            model = %self.model,
            turns = turns.len(),
            "Opening streaming completion"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach upstream endpoint");
                TutorError::UpstreamUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            error!(
                status_code = status.as_u16(),
                error_body = %error_body,
                "Upstream returned error status"
            );

            if status.as_u16() == 429 {
                return Err(TutorError::UpstreamRateLimited);
            }
            return Err(TutorError::UpstreamUnavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_body
            )));
        }

        Ok(sse_delta_stream(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::history::TurnRole;
    use futures_util::StreamExt;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    fn user_turn(text: &str) -> Vec<Turn> {
        vec![Turn {
            role: TurnRole::User,
            content: text.to_string(),
        }]
    }

    #[tokio::test]
    #[serial]
    async fn streams_deltas_from_sse_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "deepseek-chat",
                "stream": true,
            })))
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(
                "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n\
                 data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\n\
                 data: [DONE]\n\n",
            )
            .create_async()
            .await;

        let client =
            UpstreamClient::with_base_url("test-key".to_string(), None, server.url());
        let deltas = client.chat_stream(&user_turn("hello")).await.unwrap();
        let collected: Vec<_> = deltas.map(|item| item.unwrap()).collect().await;

        mock.assert_async().await;
        assert_eq!(collected, vec!["Hel".to_string(), "lo".to_string()]);
    }

    #[tokio::test]
    #[serial]
    async fn http_429_maps_to_upstream_rate_limited() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": "Rate limit exceeded"}"#)
            .create_async()
            .await;

        let client =
            UpstreamClient::with_base_url("test-key".to_string(), None, server.url());
        let result = client.chat_stream(&user_turn("hello")).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(TutorError::UpstreamRateLimited)));
    }

    #[tokio::test]
    #[serial]
    async fn other_error_status_maps_to_unavailable() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;

        let client =
            UpstreamClient::with_base_url("test-key".to_string(), None, server.url());
        let result = client.chat_stream(&user_turn("hello")).await;

        mock.assert_async().await;
        match result {
            Err(TutorError::UpstreamUnavailable(msg)) => {
                assert!(msg.contains("503"));
            }
            other => panic!("expected UpstreamUnavailable, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_maps_to_unavailable() {
        // Nothing listens on this port; the transport error must not panic
        // or surface as a rate-limit class.
        let client = UpstreamClient::with_base_url(
            "test-key".to_string(),
            None,
            "http://127.0.0.1:1".to_string(),
        );
        let result = client.chat_stream(&user_turn("hello")).await;
        assert!(matches!(result, Err(TutorError::UpstreamUnavailable(_))));
    }
}

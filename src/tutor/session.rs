//! Tutor chat session
//!
//! Owns the conversation history, the duplicate-query response cache and the
//! local throttle, and turns a user message into a stream of progressively
//! accumulated reply text. Cache and fallback hits resolve without touching
//! the network; everything else goes upstream.
//!
//! Concurrency contract: one outstanding send at a time. The state lives
//! behind async mutexes so the completed reply stream can write back the
//! cache entry and history turn, but nothing here arbitrates two concurrent
//! sends; the calling layer disables input while a reply is streaming.

use crate::tutor::cache::{normalize_query, ResponseCache};
use crate::tutor::client::UpstreamClient;
use crate::tutor::error::TutorError;
use crate::tutor::fallback;
use crate::tutor::history::{ConversationHistory, Turn};
use crate::tutor::rate_limit::MinIntervalLimiter;
use crate::tutor::stream::{accumulate, single_chunk_stream, ReplyStream};
use async_stream::stream;
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// A chat session: history + cache + throttle + upstream client
///
/// Construct one per process (or per test); all state is in-memory and dies
/// with the session.
pub struct ChatSession {
    history: Arc<Mutex<ConversationHistory>>,
    cache: Arc<Mutex<ResponseCache>>,
    limiter: Mutex<MinIntervalLimiter>,
    client: Arc<UpstreamClient>,
}

impl ChatSession {
    /// Create a session over the given upstream client
    pub fn new(client: UpstreamClient, min_interval: Duration) -> Self {
        Self {
            history: Arc::new(Mutex::new(ConversationHistory::new())),
            cache: Arc::new(Mutex::new(ResponseCache::new())),
            limiter: Mutex::new(MinIntervalLimiter::new(min_interval)),
            client: Arc::new(client),
        }
    }

    /// Produce a reply stream for one user message
    ///
    /// Resolution order: local throttle, response cache, fallback knowledge
    /// base, upstream call. The returned stream yields accumulated-text
    /// snapshots; on natural completion it records the reply in the cache
    /// and the history. A mid-stream failure surfaces as a terminal `Err`
    /// item and records nothing.
    ///
    /// Pre-flight failures (`RateLimited`, upstream status/transport errors)
    /// return `Err` directly; the caller renders `user_message()` in place
    /// of the reply.
    pub async fn send(&self, user_text: &str) -> Result<ReplyStream, TutorError> {
        self.limiter.lock().await.check()?;

        self.history.lock().await.push_user(user_text.to_string());

        let normalized = normalize_query(user_text);

        if let Some(cached) = self.cache.lock().await.get(&normalized) {
            debug!(query = %normalized, "Cache hit, skipping upstream call");
            let cached = cached.to_string();
            self.history.lock().await.push_assistant(cached.clone());
            return Ok(single_chunk_stream(cached));
        }

        if let Some(answer) = fallback::lookup(&normalized) {
            debug!(query = %normalized, "Fallback knowledge base hit");
            self.cache
                .lock()
                .await
                .insert(&normalized, answer.to_string());
            self.history
                .lock()
                .await
                .push_assistant(answer.to_string());
            return Ok(single_chunk_stream(answer.to_string()));
        }

        let turns = self.history.lock().await.turns().to_vec();
        let deltas = self.client.chat_stream(&turns).await?;
        let mut snapshots = accumulate(deltas);

        let history = Arc::clone(&self.history);
        let cache = Arc::clone(&self.cache);
        let query = normalized;

        Ok(Box::pin(stream! {
            let mut final_text = String::new();
            while let Some(item) = snapshots.next().await {
                match item {
                    Ok(snapshot) => {
                        final_text = snapshot.clone();
                        yield Ok(snapshot);
                    }
                    Err(e) => {
                        // Terminal: nothing is cached or recorded for this
                        // message, the session itself stays usable.
                        yield Err(e);
                        return;
                    }
                }
            }

            if !final_text.trim().is_empty() {
                info!(
                    query = %query,
                    response_len = final_text.len(),
                    "Reply completed, caching"
                );
                cache.lock().await.insert(&query, final_text.clone());
                history.lock().await.push_assistant(final_text);
            }
        }))
    }

    /// Clear the conversation history
    ///
    /// The next `send` reseeds the system instruction. The response cache is
    /// deliberately left warm across resets.
    pub async fn reset(&self) {
        self.history.lock().await.reset();
        info!("Conversation history cleared");
    }

    /// Inject a cache entry directly (key is normalized)
    ///
    /// Lets a caller memoize a reply it assembled itself, e.g. after
    /// consuming a stream outside the session.
    pub async fn prime_cache(&self, key: &str, value: String) {
        self.cache.lock().await.insert(key, value);
    }

    /// Snapshot of the conversation history, system turn included
    pub async fn history_turns(&self) -> Vec<Turn> {
        self.history.lock().await.turns().to_vec()
    }

    /// Number of cached responses
    pub async fn cache_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}

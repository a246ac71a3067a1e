//! End-to-end tests for the tutor chat session
//!
//! Drives ChatSession against a mock upstream endpoint and checks the
//! network-visible properties: what hits the wire, what resolves locally,
//! and how failures surface.

use futures_util::StreamExt;
use shiksha_backend::tutor::error::{
    RATE_LIMITED_MESSAGE, UPSTREAM_RATE_LIMITED_MESSAGE, UPSTREAM_UNAVAILABLE_MESSAGE,
};
use shiksha_backend::tutor::{ChatSession, TurnRole, TutorError, UpstreamClient};
use mockito::Server;
use serial_test::serial;
use std::time::Duration;

const SSE_BODY: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"Binary \"}}]}\n\n\
                        data: {\"choices\":[{\"delta\":{\"content\":\"search.\"}}]}\n\n\
                        data: [DONE]\n\n";

fn session_for(server: &Server, min_interval: Duration) -> ChatSession {
    let client = UpstreamClient::with_base_url("test-key".to_string(), None, server.url());
    ChatSession::new(client, min_interval)
}

async fn consume(session: &ChatSession, message: &str) -> Vec<String> {
    session
        .send(message)
        .await
        .unwrap()
        .map(|item| item.unwrap())
        .collect()
        .await
}

#[tokio::test]
#[serial]
async fn upstream_reply_streams_caches_and_records_history() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(SSE_BODY)
        .expect(1)
        .create_async()
        .await;

    let session = session_for(&server, Duration::ZERO);
    let snapshots = consume(&session, "explain binary search").await;

    mock.assert_async().await;
    assert_eq!(
        snapshots,
        vec!["Binary ".to_string(), "Binary search.".to_string()]
    );

    // Completion side effects: cached, and the assistant turn recorded.
    assert_eq!(session.cache_len().await, 1);
    let turns = session.history_turns().await;
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].role, TurnRole::System);
    assert_eq!(turns[2].role, TurnRole::Assistant);
    assert_eq!(turns[2].content, "Binary search.");
}

#[tokio::test]
#[serial]
async fn repeated_query_is_served_from_cache_without_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(SSE_BODY)
        .expect(1)
        .create_async()
        .await;

    let session = session_for(&server, Duration::ZERO);
    consume(&session, "explain binary search").await;

    // Case and whitespace differ; the normalized key matches.
    let snapshots = consume(&session, "  EXPLAIN Binary Search  ").await;
    assert_eq!(snapshots, vec!["Binary search.".to_string()]);

    // Exactly one upstream call across both sends.
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn throttled_send_makes_no_network_attempt() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(SSE_BODY)
        .expect(1)
        .create_async()
        .await;

    let session = session_for(&server, Duration::from_secs(60));
    consume(&session, "explain binary search").await;

    let err = session.send("another question").await.err().expect("expected send to fail");
    assert!(matches!(err, TutorError::RateLimited { .. }));
    assert_eq!(err.user_message(), RATE_LIMITED_MESSAGE);

    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn fallback_keyword_resolves_without_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let session = session_for(&server, Duration::ZERO);

    // Substring containment, not an exact key.
    let snapshots = consume(&session, "please explain time complexity").await;
    assert_eq!(snapshots.len(), 1);
    assert!(snapshots[0].contains("O(log n)"));
    assert_eq!(session.cache_len().await, 1);

    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn upstream_429_surfaces_distinct_rate_limit_text() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(r#"{"error": "Rate limit exceeded"}"#)
        .create_async()
        .await;

    let session = session_for(&server, Duration::ZERO);
    let err = session.send("explain avl trees").await.err().expect("expected send to fail");

    mock.assert_async().await;
    assert!(matches!(err, TutorError::UpstreamRateLimited));
    assert_eq!(err.user_message(), UPSTREAM_RATE_LIMITED_MESSAGE);
    assert_ne!(err.user_message(), UPSTREAM_UNAVAILABLE_MESSAGE);
}

#[tokio::test]
#[serial]
async fn failed_reply_is_not_cached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let session = session_for(&server, Duration::ZERO);
    let err = session.send("explain avl trees").await.err().expect("expected send to fail");
    assert!(matches!(err, TutorError::UpstreamUnavailable(_)));

    mock.assert_async().await;
    assert_eq!(session.cache_len().await, 0);

    // No assistant turn was recorded for the failed message.
    let turns = session.history_turns().await;
    assert_eq!(turns.last().unwrap().role, TurnRole::User);
}

#[tokio::test]
#[serial]
async fn reset_reseeds_system_turn_but_cache_survives() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(SSE_BODY)
        .expect(1)
        .create_async()
        .await;

    let session = session_for(&server, Duration::ZERO);
    consume(&session, "explain binary search").await;

    session.reset().await;
    assert!(session.history_turns().await.is_empty());

    // Same query after reset: answered from cache, no second upstream call.
    let snapshots = consume(&session, "explain binary search").await;
    assert_eq!(snapshots, vec!["Binary search.".to_string()]);
    mock.assert_async().await;

    let turns = session.history_turns().await;
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].role, TurnRole::System);
}

#[tokio::test]
#[serial]
async fn primed_cache_entry_round_trips_through_send() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let session = session_for(&server, Duration::ZERO);
    session
        .prime_cache("  Explain Tries  ", "A trie is a prefix tree.".to_string())
        .await;

    let snapshots = consume(&session, "explain tries").await;
    assert_eq!(snapshots, vec!["A trie is a prefix tree.".to_string()]);

    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn malformed_frames_are_skipped_mid_stream() {
    let body = "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n\
                data: not json\n\n\
                data: {\"unknown\": true}\n\n\
                data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\n\
                data: [DONE]\n\n";
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(body)
        .create_async()
        .await;

    let session = session_for(&server, Duration::ZERO);
    let snapshots = consume(&session, "explain linked list reversal").await;

    mock.assert_async().await;
    assert_eq!(snapshots, vec!["Hel".to_string(), "Hello".to_string()]);
}

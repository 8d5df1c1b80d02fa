//! Integration tests for ChatRelay.
//!
//! These tests run the real axum server on an ephemeral port and drive it
//! through the real HTTP proxy transport, with the completion service
//! mocked out.

use std::net::SocketAddr;
use std::sync::Arc;

use chatrelay::{
    router, AppState, ChatSession, HttpChatProxy, MockCompletion, ERROR_REPLY,
};

/// Bind the chat API to an ephemeral local port and serve it in the
/// background. Returns the bound address.
async fn spawn_server(mock: Arc<MockCompletion>) -> SocketAddr {
    let state = AppState::new(mock);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, router(state))
            .await
            .expect("Test server exited");
    });

    addr
}

fn server_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

#[tokio::test]
async fn test_end_to_end_round_trip() {
    let mock = Arc::new(MockCompletion::replying("Hi! How can I help?"));
    let addr = spawn_server(mock.clone()).await;

    let proxy = Arc::new(HttpChatProxy::new(server_url(addr)));
    let mut session = ChatSession::new(proxy);

    session.submit("Hello").await.expect("submit rejected");

    let messages = session.conversation().messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].is_user());
    assert_eq!(messages[0].content(), "Hello");
    assert!(messages[1].is_assistant());
    assert!(!messages[1].content().is_empty());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_non_empty_input_always_yields_non_empty_response() {
    // Provider returns no content; the proxy substitutes its fallback.
    let addr = spawn_server(Arc::new(MockCompletion::replying(""))).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", server_url(addr)))
        .json(&serde_json::json!({ "message": "anything" }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("invalid body");
    let text = body["response"].as_str().expect("missing response field");
    assert!(!text.is_empty());
}

#[tokio::test]
async fn test_missing_message_is_400_and_upstream_never_called() {
    let mock = Arc::new(MockCompletion::replying("unused"));
    let addr = spawn_server(mock.clone()).await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/chat", server_url(addr));

    for body in [
        serde_json::json!({}),
        serde_json::json!({ "message": "" }),
        serde_json::json!({ "message": "   " }),
    ] {
        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .expect("request failed");
        assert_eq!(response.status(), 400, "body {body} should be rejected");

        let payload: serde_json::Value = response.json().await.expect("invalid body");
        assert_eq!(payload["error"], "Message is required");
    }

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_generic_500() {
    let addr = spawn_server(Arc::new(MockCompletion::failing("secret key rejected"))).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", server_url(addr)))
        .json(&serde_json::json!({ "message": "Hello" }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), 500);
    let payload: serde_json::Value = response.json().await.expect("invalid body");
    assert_eq!(payload["error"], "Error processing your request");
}

#[tokio::test]
async fn test_upstream_failure_becomes_canned_assistant_entry() {
    let addr = spawn_server(Arc::new(MockCompletion::failing("boom"))).await;

    let proxy = Arc::new(HttpChatProxy::new(server_url(addr)));
    let mut session = ChatSession::new(proxy);

    session.submit("Hello").await.expect("submit rejected");

    let messages = session.conversation().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content(), ERROR_REPLY);
}

#[tokio::test]
async fn test_unreachable_server_becomes_canned_assistant_entry() {
    // Bind then immediately drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let proxy = Arc::new(HttpChatProxy::new(server_url(addr)));
    let mut session = ChatSession::new(proxy);

    session.submit("Hello").await.expect("submit rejected");

    assert_eq!(session.conversation().len(), 2);
    assert_eq!(session.conversation().last().unwrap().content(), ERROR_REPLY);
}

#[tokio::test]
async fn test_completed_sends_alternate_strictly() {
    let mock = Arc::new(MockCompletion::replying("ack"));
    let addr = spawn_server(mock.clone()).await;

    let proxy = Arc::new(HttpChatProxy::new(server_url(addr)));
    let mut session = ChatSession::new(proxy);

    for i in 0..3 {
        session
            .submit(&format!("message {i}"))
            .await
            .expect("submit rejected");
    }

    // One user + one assistant entry per completed send.
    assert_eq!(session.conversation().len(), 6);
    assert!(session.conversation().is_alternating());
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn test_health_endpoint() {
    let addr = spawn_server(Arc::new(MockCompletion::replying("unused"))).await;

    let response = reqwest::get(format!("{}/health", server_url(addr)))
        .await
        .expect("request failed");

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}

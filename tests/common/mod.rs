//! Common test utilities for integration tests.
//!
//! Fixtures for building a controller against a wiremock server and for
//! writing SSE response bodies.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chatline::adapters::mock::InMemoryIdentityStore;
use chatline::adapters::ReqwestHttpClient;
use chatline::app::{AppMessage, ChatApp};
use chatline::auth::Identity;
use chatline::startup::{self, ClientConfig};
use serde_json::json;
use wiremock::ResponseTemplate;

pub const TEST_USER: &str = "test-user-id";

/// Identity used by integration tests.
pub fn test_identity() -> Identity {
    Identity::new(TEST_USER)
}

/// Build a controller that talks to `base_url` over real HTTP.
pub async fn app_for(base_url: &str) -> (ChatApp, InMemoryIdentityStore) {
    let store = InMemoryIdentityStore::with_identity(test_identity());
    let app = startup::prepare_with(
        ClientConfig::new(base_url),
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(store.clone()),
    )
    .await
    .expect("controller should start");
    (app, store)
}

/// A `delta` event frame.
pub fn delta(content: &str) -> String {
    format!("event: delta\ndata: {}\n\n", json!({ "content": content }))
}

/// A `done` event frame.
pub fn done() -> String {
    "event: done\ndata: [DONE]\n\n".to_string()
}

/// 200 response carrying an SSE body.
pub fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

/// 200 response carrying `{"ok": true, "data": data}`.
pub fn ok_envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "data": data }))
}

/// Receive the next app message, failing the test after five seconds.
pub async fn next_message(app: &mut ChatApp) -> AppMessage {
    let rx = app.message_rx.as_mut().expect("receiver taken");
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for app message")
        .expect("channel closed")
}

/// Apply messages until the stream for `request_id` finishes.
pub async fn drive_stream(app: &mut ChatApp, request_id: &str) {
    loop {
        let msg = next_message(app).await;
        let done = matches!(&msg, AppMessage::StreamFinished { request_id: r, .. } if r == request_id);
        app.handle_message(msg);
        if done {
            return;
        }
    }
}

/// Apply messages until a history result for `session_id` arrives.
pub async fn drive_history(app: &mut ChatApp, session_id: &str) {
    loop {
        let msg = next_message(app).await;
        let done = matches!(
            &msg,
            AppMessage::HistoryLoaded { session_id: s, .. } | AppMessage::HistoryFailed { session_id: s, .. }
                if s == session_id
        );
        app.handle_message(msg);
        if done {
            return;
        }
    }
}

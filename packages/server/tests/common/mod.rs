//! Shared helpers for integration tests.
//!
//! The server runs in-process on an ephemeral port; clients talk to it over
//! real WebSocket and HTTP connections.

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hibiki_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryGroupRepository, InMemoryMessageRepository},
    },
    ui::{AppState, Server},
};
use hibiki_shared::time::SystemClock;
use serde_json::Value;
use tokio::{net::TcpStream, task::JoinHandle, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Helper struct to manage the in-process server lifecycle
pub struct TestServer {
    port: u16,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server on an ephemeral port
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let port = listener.local_addr().expect("No local address").port();

        let app_state = AppState::new(
            Arc::new(WebSocketMessagePusher::new()),
            Arc::new(InMemoryGroupRepository::new()),
            Arc::new(InMemoryMessageRepository::new()),
            Arc::new(SystemClock),
        );
        let server = Server::new(app_state);
        let handle = tokio::spawn(async move {
            if let Err(e) = server.serve(listener).await {
                eprintln!("test server error: {}", e);
            }
        });

        TestServer { port, handle }
    }

    pub fn ws_url(&self, user_id: &str) -> String {
        format!("ws://127.0.0.1:{}/ws/{}", self.port, user_id)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    /// Connect as `user_id` and consume the welcome message
    pub async fn connect(&self, user_id: &str) -> WsClient {
        let (mut client, _response) = connect_async(self.ws_url(user_id))
            .await
            .expect("Failed to connect");
        let welcome = recv_json(&mut client).await;
        assert_eq!(welcome["type"], "welcome");
        assert_eq!(welcome["user_id"], user_id);
        client
    }

    pub async fn stats(&self) -> Value {
        reqwest::get(self.http_url("/ws/stats"))
            .await
            .expect("stats request failed")
            .json()
            .await
            .expect("stats body is not JSON")
    }

    /// Poll the stats endpoint until `predicate` holds
    pub async fn wait_for_stats(&self, predicate: impl Fn(&Value) -> bool) -> Value {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let stats = self.stats().await;
            if predicate(&stats) {
                return stats;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "stats never matched, last: {}",
                stats
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    /// Create a group over HTTP
    pub async fn create_group(&self, group_id: &str, member_ids: &[&str]) {
        let response = reqwest::Client::new()
            .post(self.http_url("/api/groups"))
            .json(&serde_json::json!({
                "group_id": group_id,
                "name": format!("{} name", group_id),
                "member_ids": member_ids,
            }))
            .send()
            .await
            .expect("create group request failed");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Receive the next text frame as JSON
pub async fn recv_json(client: &mut WsClient) -> Value {
    loop {
        let message = timeout(RECV_TIMEOUT, client.next())
            .await
            .expect("Timed out waiting for a message")
            .expect("Stream ended")
            .expect("WebSocket error");
        if let Message::Text(text) = message {
            return serde_json::from_str(text.as_str()).expect("Message is not JSON");
        }
    }
}

pub async fn send_text(client: &mut WsClient, text: &str) {
    client
        .send(Message::text(text))
        .await
        .expect("Failed to send message");
}

pub async fn send_json(client: &mut WsClient, value: Value) {
    send_text(client, &value.to_string()).await;
}

/// Assert that no text frame arrives within a short window
pub async fn assert_no_message(client: &mut WsClient) {
    let result = timeout(Duration::from_millis(200), client.next()).await;
    assert!(result.is_err(), "unexpected message: {:?}", result);
}

//! Integration tests for the WebSocket protocol loop.

mod common;

use common::{TestServer, assert_no_message, recv_json, send_json, send_text};
use futures_util::SinkExt;
use serde_json::json;
use tokio_tungstenite::{connect_async, tungstenite};

// ========================================
// テスト作業記録
// ========================================
// 【何をテストするか】
// - 接続時のウェルカムメッセージと、切断時の登録解除
// - ping / echo / send_message / 未知の type / JSON 以外の入力への返信
// - send_message によるグループメンバーへのファンアウト
//
// 【なぜこのテストが必要か】
// - 実際のソケット越しに、登録から解除までのライフサイクルを確認する
// ========================================

#[tokio::test]
async fn test_ping_pong_and_disconnect_reaping() {
    // テスト項目: ping に timestamp 付きの pong が返り、切断後は統計から消える
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect("user1").await;
    let stats = server.stats().await;
    assert_eq!(stats["total_connections"], 1);
    assert_eq!(stats["connected_users"], json!(["user1"]));

    // when (操作):
    send_json(&mut client, json!({"type": "ping", "timestamp": 42})).await;
    let pong = recv_json(&mut client).await;
    client.close(None).await.expect("Failed to close");

    // then (期待する結果):
    assert_eq!(pong, json!({"type": "pong", "timestamp": 42}));
    let stats = server
        .wait_for_stats(|stats| stats["total_connections"] == 0)
        .await;
    assert_eq!(stats["connected_users_count"], 0);
    assert_eq!(stats["connected_users"], json!([]));
}

#[tokio::test]
async fn test_ping_without_timestamp() {
    // テスト項目: timestamp なしの ping には timestamp が null の pong が返る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect("user1").await;

    // when (操作):
    send_json(&mut client, json!({"type": "ping"})).await;

    // then (期待する結果):
    assert_eq!(
        recv_json(&mut client).await,
        json!({"type": "pong", "timestamp": null})
    );
}

#[tokio::test]
async fn test_send_message_between_group_members() {
    // テスト項目: user1 の send_message が user2 に new_message として届き、user1 には message_sent が返る
    // given (前提条件):
    let server = TestServer::start().await;
    server.create_group("group_001", &["user1", "user2"]).await;
    let mut user1 = server.connect("user1").await;
    let mut user2 = server.connect("user2").await;

    // when (操作):
    send_json(
        &mut user1,
        json!({"type": "send_message", "group_id": "group_001", "content": "Hello, user2!"}),
    )
    .await;

    // then (期待する結果):
    let notification = recv_json(&mut user2).await;
    assert_eq!(notification["type"], "new_message");
    assert_eq!(notification["group_id"], "group_001");
    assert_eq!(notification["from_user_id"], "user1");
    assert_eq!(notification["msg_type"], "TEXT");
    assert_eq!(notification["msg_content"], "Hello, user2!");
    assert!(notification["timestamp"].is_string());

    let reply = recv_json(&mut user1).await;
    assert_eq!(reply["type"], "message_sent");
    assert_eq!(reply["group_id"], "group_001");
    assert_eq!(reply["content"], "Hello, user2!");
    assert_eq!(reply["message_id"], notification["message_id"]);

    // 送信者には new_message は届かない
    assert_no_message(&mut user1).await;
}

#[tokio::test]
async fn test_send_message_reaches_every_device_of_member() {
    // テスト項目: 複数端末で接続しているメンバーには全ての接続に届く
    // given (前提条件):
    let server = TestServer::start().await;
    server.create_group("group_001", &["user1", "user2"]).await;
    let mut user1 = server.connect("user1").await;
    let mut phone = server.connect("user2").await;
    let mut laptop = server.connect("user2").await;

    // when (操作):
    send_json(
        &mut user1,
        json!({"type": "send_message", "group_id": "group_001", "content": "hi"}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(recv_json(&mut phone).await["type"], "new_message");
    assert_eq!(recv_json(&mut laptop).await["type"], "new_message");
    let stats = server.stats().await;
    assert_eq!(stats["total_connections"], 3);
    assert_eq!(stats["connected_users_count"], 2);
}

#[tokio::test]
async fn test_send_message_errors_keep_connection_open() {
    // テスト項目: send_message の失敗はエラーコード付きで返り、接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    server.create_group("group_001", &["user2"]).await;
    let mut client = server.connect("user1").await;

    // when (操作):
    send_json(&mut client, json!({"type": "send_message", "content": "hi"})).await;
    let missing_group = recv_json(&mut client).await;
    send_json(&mut client, json!({"type": "send_message", "group_id": "group_001"})).await;
    let missing_content = recv_json(&mut client).await;
    send_json(
        &mut client,
        json!({"type": "send_message", "group_id": "nope", "content": "hi"}),
    )
    .await;
    let not_found = recv_json(&mut client).await;
    send_json(
        &mut client,
        json!({"type": "send_message", "group_id": "group_001", "content": "hi"}),
    )
    .await;
    let not_member = recv_json(&mut client).await;
    send_json(
        &mut client,
        json!({"type": "send_message", "group_id": "group_001", "content": "a".repeat(5001)}),
    )
    .await;
    let too_long = recv_json(&mut client).await;
    send_json(
        &mut client,
        json!({"type": "send_message", "group_id": "group_001", "content": 7}),
    )
    .await;
    let invalid_payload = recv_json(&mut client).await;

    // then (期待する結果):
    assert_eq!(missing_group["code"], "MISSING_GROUP_ID");
    assert_eq!(missing_content["code"], "MISSING_CONTENT");
    assert_eq!(not_found["code"], "NOT_FOUND");
    assert_eq!(not_member["code"], "NOT_FOUND");
    assert_eq!(too_long["code"], "VALIDATION_ERROR");
    assert_eq!(invalid_payload["code"], "INVALID_PAYLOAD");
    for reply in [&missing_group, &not_found, &too_long] {
        assert_eq!(reply["type"], "error");
    }

    send_json(&mut client, json!({"type": "ping", "timestamp": 1})).await;
    assert_eq!(recv_json(&mut client).await["type"], "pong");
}

#[tokio::test]
async fn test_unknown_type_returns_error() {
    // テスト項目: 未知の type と type なしは UNKNOWN_MESSAGE_TYPE になり、接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect("user1").await;

    // when (操作):
    send_json(&mut client, json!({"type": "dance"})).await;
    let unknown = recv_json(&mut client).await;
    send_json(&mut client, json!({"content": "no type"})).await;
    let missing = recv_json(&mut client).await;

    // then (期待する結果):
    assert_eq!(unknown["type"], "error");
    assert_eq!(unknown["code"], "UNKNOWN_MESSAGE_TYPE");
    assert_eq!(missing["code"], "UNKNOWN_MESSAGE_TYPE");
    assert_eq!(server.stats().await["total_connections"], 1);
}

#[tokio::test]
async fn test_echo_returns_content_and_original() {
    // テスト項目: echo は content と元のメッセージを返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect("user1").await;
    let original = json!({"type": "echo", "content": "hello", "extra": [1, 2]});

    // when (操作):
    send_json(&mut client, original.clone()).await;

    // then (期待する結果):
    assert_eq!(
        recv_json(&mut client).await,
        json!({"type": "echo", "content": "hello", "original": original})
    );
}

#[tokio::test]
async fn test_non_json_text_is_acknowledged() {
    // テスト項目: JSON でないテキストは message 型で受信確認が返る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect("user1").await;

    // when (操作):
    send_text(&mut client, "just some text").await;

    // then (期待する結果):
    assert_eq!(
        recv_json(&mut client).await,
        json!({
            "type": "message",
            "content": {"type": "text", "content": "just some text"},
            "message": "Received: just some text"
        })
    );
}

#[tokio::test]
async fn test_binary_frame_is_rejected() {
    // テスト項目: バイナリフレームには UNSUPPORTED_FRAME が返る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect("user1").await;

    // when (操作):
    client
        .send(tungstenite::Message::binary(vec![1u8, 2, 3]))
        .await
        .expect("Failed to send binary frame");

    // then (期待する結果):
    assert_eq!(recv_json(&mut client).await["code"], "UNSUPPORTED_FRAME");
}

#[tokio::test]
async fn test_blank_user_id_is_rejected() {
    // テスト項目: 空白だけの user_id では接続できない
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let result = connect_async(server.ws_url("%20")).await;

    // then (期待する結果):
    match result {
        Err(tungstenite::Error::Http(response)) => {
            assert_eq!(response.status(), 400);
        }
        other => panic!("expected HTTP 400, got {:?}", other.map(|_| ())),
    }
    assert_eq!(server.stats().await["total_connections"], 0);
}

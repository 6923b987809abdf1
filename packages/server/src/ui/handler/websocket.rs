//! WebSocket connection handlers.
//!
//! ## 接続のライフサイクル
//!
//! ```text
//! Connecting → Active → Closing → Closed
//! ```
//!
//! - Connecting: ウェルカムメッセージを送信キューに積んでから接続を登録する
//! - Active: 受信フレームを 1 つずつ処理し、発信元の接続に返信する
//! - Closing: Close フレーム、ストリームの終了、受信エラー、返信の失敗
//! - Closed: 接続の登録を解除する（どの経路でも 1 回だけ）

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatMessage, ConnectionId, GroupId, MessageContent, OUTBOUND_BUFFER, UserId},
    infrastructure::dto::websocket::{
        InboundFrame, SendMessageRequest, ServerMessage, error_code,
    },
    ui::state::AppState,
    usecase::SendMessageError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(user_id_str): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> UserId (Domain Model)
    let user_id = match UserId::try_from(user_id_str.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid user_id format: '{}'", user_id_str);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user_id)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: every message addressed to this
/// connection (replies, fan-out, broadcasts) goes through the rx channel.
///
/// # Arguments
///
/// * `rx` - Channel receiver registered for this connection
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user_id: UserId) {
    let (sender, receiver) = socket.split();

    // Connecting → Active
    let (tx, rx) = mpsc::channel(OUTBOUND_BUFFER);
    let welcome = ServerMessage::welcome(user_id.as_str()).to_json();
    let connection_id = state
        .connect_user_usecase
        .execute(user_id.clone(), tx, welcome)
        .await;
    let mut send_task = pusher_loop(rx, sender);
    tracing::info!("User '{}' connected ({})", user_id, connection_id);

    // Active: 受信ループは別タスクで動かし、パニックしても切断処理は必ず行う
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.clone(),
        connection_id,
        user_id.clone(),
    ));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        result = &mut recv_task => {
            if let Err(e) = result {
                tracing::error!("Receive loop for {} terminated abnormally: {}", connection_id, e);
            }
            send_task.abort();
        }
        _ = &mut send_task => recv_task.abort(),
    };

    // Closing → Closed
    match state.disconnect_user_usecase.execute(connection_id).await {
        Some(outcome) => tracing::info!(
            "User '{}' disconnected ({}), {} connection(s) remaining",
            outcome.user_id,
            connection_id,
            outcome.remaining_connections
        ),
        None => tracing::debug!("{} was already unregistered", connection_id),
    }
}

async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    user_id: UserId,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on {}: {}", connection_id, e);
                break;
            }
        };

        let reply = match msg {
            Message::Text(text) => {
                tracing::debug!("Received text from '{}': {}", user_id, text.as_str());
                handle_text_frame(&state, &user_id, text.as_str()).await
            }
            Message::Binary(_) => ServerMessage::error(
                "binary frames are not supported",
                error_code::UNSUPPORTED_FRAME,
            ),
            Message::Ping(_) | Message::Pong(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
                continue;
            }
            Message::Close(_) => {
                tracing::info!("User '{}' requested close ({})", user_id, connection_id);
                break;
            }
        };

        if !state
            .message_pusher
            .push_to_connection(connection_id, &reply.to_json())
            .await
        {
            tracing::warn!("Reply to {} failed, closing", connection_id);
            break;
        }
    }
}

/// テキストフレームを処理し、発信元への返信を作る
async fn handle_text_frame(state: &AppState, user_id: &UserId, text: &str) -> ServerMessage {
    match InboundFrame::decode(text) {
        InboundFrame::Ping { timestamp } => ServerMessage::pong(timestamp),
        InboundFrame::Echo { content, original } => ServerMessage::echo(content, original),
        InboundFrame::SendMessage(request) => handle_send_message(state, user_id, request).await,
        InboundFrame::InvalidPayload {
            message_type,
            reason,
        } => {
            tracing::warn!("Invalid '{}' payload from '{}': {}", message_type, user_id, reason);
            ServerMessage::error(
                format!("invalid '{}' payload: {}", message_type, reason),
                error_code::INVALID_PAYLOAD,
            )
        }
        InboundFrame::Unknown { message_type } => {
            let message_type = message_type.unwrap_or_else(|| "unknown".to_string());
            tracing::warn!("Unknown message type from '{}': {}", user_id, message_type);
            ServerMessage::error(
                format!("unknown message type: {}", message_type),
                error_code::UNKNOWN_MESSAGE_TYPE,
            )
        }
        InboundFrame::Opaque(raw) => ServerMessage::received_text(&raw),
    }
}

async fn handle_send_message(
    state: &AppState,
    user_id: &UserId,
    request: SendMessageRequest,
) -> ServerMessage {
    let Some(group_id) = request.group_id.filter(|id| !id.trim().is_empty()) else {
        return ServerMessage::error("group_id is required", error_code::MISSING_GROUP_ID);
    };
    let Some(content) = request.content.filter(|content| !content.is_empty()) else {
        return ServerMessage::error("content is required", error_code::MISSING_CONTENT);
    };

    match send_message(state, user_id, group_id, content).await {
        Ok(message) => ServerMessage::message_sent(&message),
        Err(e) => {
            tracing::warn!("Failed to send message from '{}': {}", user_id, e);
            ServerMessage::error(e.to_string(), e.code())
        }
    }
}

/// メッセージを作成し、グループの他のメンバーに通知する
async fn send_message(
    state: &AppState,
    user_id: &UserId,
    group_id: String,
    content: String,
) -> Result<ChatMessage, SendMessageError> {
    // Convert String -> Domain Models
    let group_id = GroupId::new(group_id)?;
    let content = MessageContent::new(content)?;

    let message = state
        .send_message_usecase
        .execute(user_id.clone(), group_id, content)
        .await?;

    let notification = ServerMessage::new_message(&message).to_value();
    let notified = state
        .send_message_usecase
        .notify_group(&message, notification)
        .await;
    tracing::debug!(
        "Message '{}' delivered to {} member(s)",
        message.id.as_str(),
        notified
    );

    Ok(message)
}

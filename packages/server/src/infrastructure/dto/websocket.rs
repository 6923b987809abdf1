//! WebSocket frame DTOs.
//!
//! ## 受信フレーム
//!
//! テキストフレームは `type` を先に読み、種別ごとに残りのフィールドを解釈します。
//! JSON オブジェクトとして読めないフレームは `Opaque` として扱います。
//!
//! ## 送信メッセージ
//!
//! 全て `type` フィールドを持つフラットな JSON オブジェクトです。

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// 受信フレームの `type`
pub const PING: &str = "ping";
pub const ECHO: &str = "echo";
pub const SEND_MESSAGE: &str = "send_message";

/// `send_message` フレームのフィールド
///
/// 欠けているフィールドは `None` になり、ハンドラが個別のエラーコードを返す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// デコード済みの受信フレーム
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    /// ハートビート（`timestamp` はそのまま返す）
    Ping { timestamp: Option<Value> },
    /// 受け取った内容をそのまま返す
    Echo {
        content: Option<Value>,
        original: Value,
    },
    /// グループへのメッセージ送信
    SendMessage(SendMessageRequest),
    /// 既知の `type` だがフィールドが解釈できない
    InvalidPayload { message_type: String, reason: String },
    /// 未知の `type`（`type` がない場合は `None`）
    Unknown { message_type: Option<String> },
    /// JSON オブジェクトではないテキスト
    Opaque(String),
}

impl InboundFrame {
    /// テキストフレームをデコードする
    pub fn decode(text: &str) -> Self {
        let value = match serde_json::from_str::<Value>(text) {
            Ok(value @ Value::Object(_)) => value,
            _ => return InboundFrame::Opaque(text.to_string()),
        };

        let message_type = value.get("type").and_then(Value::as_str).map(str::to_string);
        match message_type.as_deref() {
            Some(PING) => InboundFrame::Ping {
                timestamp: value.get("timestamp").cloned(),
            },
            Some(ECHO) => InboundFrame::Echo {
                content: value.get("content").cloned(),
                original: value,
            },
            Some(SEND_MESSAGE) => match serde_json::from_value::<SendMessageRequest>(value) {
                Ok(request) => InboundFrame::SendMessage(request),
                Err(e) => InboundFrame::InvalidPayload {
                    message_type: SEND_MESSAGE.to_string(),
                    reason: e.to_string(),
                },
            },
            _ => InboundFrame::Unknown { message_type },
        }
    }
}

/// エラーコード
pub mod error_code {
    pub const MISSING_GROUP_ID: &str = "MISSING_GROUP_ID";
    pub const MISSING_CONTENT: &str = "MISSING_CONTENT";
    pub const INVALID_PAYLOAD: &str = "INVALID_PAYLOAD";
    pub const UNKNOWN_MESSAGE_TYPE: &str = "UNKNOWN_MESSAGE_TYPE";
    pub const UNSUPPORTED_FRAME: &str = "UNSUPPORTED_FRAME";
}

/// サーバーからクライアントへ送るメッセージ
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        user_id: String,
        message: String,
    },
    /// `timestamp` は送られてこなかった場合も `null` として含める
    Pong { timestamp: Option<Value> },
    Echo {
        content: Value,
        original: Value,
    },
    Message {
        content: Value,
        message: String,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
    NewMessage {
        message_id: String,
        group_id: String,
        from_user_id: String,
        msg_type: String,
        msg_content: String,
        created_at: String,
    },
    MessageSent {
        message_id: String,
        group_id: String,
        content: String,
        created_at: String,
    },
}

impl ServerMessage {
    pub fn welcome(user_id: &str) -> Self {
        ServerMessage::Welcome {
            user_id: user_id.to_string(),
            message: format!("Welcome, {}!", user_id),
        }
    }

    pub fn pong(timestamp: Option<Value>) -> Self {
        ServerMessage::Pong { timestamp }
    }

    pub fn echo(content: Option<Value>, original: Value) -> Self {
        ServerMessage::Echo {
            content: content.unwrap_or_else(|| Value::String(String::new())),
            original,
        }
    }

    /// JSON として読めなかったテキストへの返信
    pub fn received_text(raw: &str) -> Self {
        ServerMessage::Message {
            content: json!({"type": "text", "content": raw}),
            message: format!("Received: {}", raw),
        }
    }

    pub fn error(message: impl Into<String>, code: &str) -> Self {
        ServerMessage::Error {
            message: message.into(),
            code: Some(code.to_string()),
        }
    }

    /// JSON 文字列に変換
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize server message: {}", e);
                r#"{"type":"error","message":"internal error"}"#.to_string()
            }
        }
    }

    /// JSON 値に変換（ディスパッチャ経由で送る場合）
    pub fn to_value(&self) -> Value {
        match serde_json::to_value(self) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize server message: {}", e);
                json!({"type": "error", "message": "internal error"})
            }
        }
    }
}

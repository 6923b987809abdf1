//! Conversion logic from domain entities to DTOs.
//!
//! 時刻は全て JST の RFC 3339 文字列に変換します。

use hibiki_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    domain::entity,
    infrastructure::dto::{http, websocket::ServerMessage},
    usecase::{ConnectionStats, MessagePage},
};

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&entity::Group> for http::GroupDetailResponse {
    fn from(model: &entity::Group) -> Self {
        Self {
            group_id: model.id.as_str().to_string(),
            name: model.name.as_str().to_string(),
            member_ids: model
                .member_ids
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            member_count: model.member_ids.len(),
            created_at: timestamp_to_jst_rfc3339(model.created_at.value()),
        }
    }
}

impl From<&entity::ChatMessage> for http::MessageResponse {
    fn from(model: &entity::ChatMessage) -> Self {
        Self {
            message_id: model.id.as_str().to_string(),
            group_id: model.group_id.as_str().to_string(),
            from_user_id: model.from.as_str().to_string(),
            msg_type: model.kind.as_str().to_string(),
            msg_content: model.content.as_str().to_string(),
            created_at: timestamp_to_jst_rfc3339(model.created_at.value()),
        }
    }
}

impl From<MessagePage> for http::MessageListResponse {
    fn from(page: MessagePage) -> Self {
        Self {
            messages: page.messages.iter().map(http::MessageResponse::from).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}

impl From<ConnectionStats> for http::ConnectionStatsResponse {
    fn from(stats: ConnectionStats) -> Self {
        Self {
            total_connections: stats.total_connections,
            connected_users_count: stats.connected_users_count(),
            connected_users: stats
                .connected_users
                .into_iter()
                .map(|id| id.into_string())
                .collect(),
        }
    }
}

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl ServerMessage {
    /// グループの他のメンバーへの新着通知
    pub fn new_message(message: &entity::ChatMessage) -> Self {
        ServerMessage::NewMessage {
            message_id: message.id.as_str().to_string(),
            group_id: message.group_id.as_str().to_string(),
            from_user_id: message.from.as_str().to_string(),
            msg_type: message.kind.as_str().to_string(),
            msg_content: message.content.as_str().to_string(),
            created_at: timestamp_to_jst_rfc3339(message.created_at.value()),
        }
    }

    /// 送信者への送信完了通知
    pub fn message_sent(message: &entity::ChatMessage) -> Self {
        ServerMessage::MessageSent {
            message_id: message.id.as_str().to_string(),
            group_id: message.group_id.as_str().to_string(),
            content: message.content.as_str().to_string(),
            created_at: timestamp_to_jst_rfc3339(message.created_at.value()),
        }
    }
}

//! HTTP API request / response DTOs.

use serde::{Deserialize, Serialize};

/// ページ番号の既定値
pub const DEFAULT_PAGE: usize = 1;
/// 1 ページあたりの件数の既定値
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// 接続統計
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatsResponse {
    pub total_connections: usize,
    pub connected_users_count: usize,
    /// ユーザー ID の昇順
    pub connected_users: Vec<String>,
}

/// グループ作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    #[serde(default)]
    pub group_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
}

/// メンバー追加リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: String,
}

/// `POST /api/messages?from_user_id=`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendMessageQuery {
    pub from_user_id: String,
}

/// メッセージ送信リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageBody {
    pub group_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDetailResponse {
    pub group_id: String,
    pub name: String,
    /// 参加順
    pub member_ids: Vec<String>,
    pub member_count: usize,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message_id: String,
    pub group_id: String,
    pub from_user_id: String,
    pub msg_type: String,
    pub msg_content: String,
    pub created_at: String,
}

/// メッセージ履歴（新しい順）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

fn default_page() -> usize {
    DEFAULT_PAGE
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// `?page=&page_size=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

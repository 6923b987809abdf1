//! MessagePusher trait 定義
//!
//! 接続中のクライアントへのメッセージ送信（通知）を抽象化します。
//! 接続の登録・解除と、ユーザー単位・接続単位・全体への送信を提供します。
//!
//! 「見つからない」は `Option` / `bool` / `0` で表し、エラーにはしません。
//! 送信に失敗した接続は死んだものとみなし、送信処理の中で登録解除されます。

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, UserId};

/// 1 接続あたりの未送信メッセージの上限
///
/// 相手が読まずに溜まった接続は、上限に達した時点で送信失敗として登録解除されます。
pub const OUTBOUND_BUFFER: usize = 256;

/// 1 接続への送信チャネル
///
/// 受信側は接続ごとの書き込みタスクが保持し、WebSocket に書き出します。
/// 受信側が drop されるか、バッファが一杯になると送信は失敗します（待たない）。
pub type PusherChannel = mpsc::Sender<String>;

/// MessagePusher trait
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録し、新しい ConnectionId を返す
    async fn register_connection(&self, user_id: UserId, channel: PusherChannel) -> ConnectionId;

    /// 接続の登録を解除し、所有していたユーザーを返す
    ///
    /// 未登録・解除済みの場合は `None`（二重解除は何もしない）。
    async fn unregister_connection(&self, connection_id: ConnectionId) -> Option<UserId>;

    /// 1 つの接続に送信する
    async fn push_to_connection(&self, connection_id: ConnectionId, content: &str) -> bool;

    /// ユーザーの全ての接続に送信する
    ///
    /// 1 つ以上の接続に届いた場合に `true`。
    async fn push_to_user(&self, user_id: &UserId, content: &str) -> bool;

    /// 全ての接続に送信し、届いた接続数を返す
    async fn broadcast(&self, content: &str, exclude: Option<&UserId>) -> usize;

    /// ユーザーの接続数
    async fn connection_count_for_user(&self, user_id: &UserId) -> usize;

    /// 全接続数
    async fn total_connection_count(&self) -> usize;

    /// 接続中のユーザー ID（スナップショット）
    async fn connected_user_ids(&self) -> HashSet<UserId>;

    /// ユーザーが 1 つ以上の接続を持っているか
    async fn is_user_connected(&self, user_id: &UserId) -> bool;
}

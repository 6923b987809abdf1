//! UseCase: 接続統計の取得

use std::sync::Arc;

use crate::domain::{MessagePusher, UserId};

/// 接続統計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStats {
    /// 全接続数
    pub total_connections: usize,
    /// 接続中のユーザー（ID 順）
    pub connected_users: Vec<UserId>,
}

impl ConnectionStats {
    pub fn connected_users_count(&self) -> usize {
        self.connected_users.len()
    }
}

/// 接続統計取得のユースケース
pub struct GetConnectionStatsUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetConnectionStatsUseCase {
    /// 新しい GetConnectionStatsUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続統計を取得
    pub async fn execute(&self) -> ConnectionStats {
        let total_connections = self.message_pusher.total_connection_count().await;

        let mut connected_users: Vec<UserId> = self
            .message_pusher
            .connected_user_ids()
            .await
            .into_iter()
            .collect();
        // Sort by user_id for consistent ordering
        connected_users.sort();

        ConnectionStats {
            total_connections,
            connected_users,
        }
    }
}

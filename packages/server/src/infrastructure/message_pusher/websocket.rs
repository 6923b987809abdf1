//! WebSocket を使った MessagePusher 実装（接続レジストリ）
//!
//! ## 責務
//!
//! - ユーザー ID → 接続の集合（正引き）と、接続 → ユーザー ID（逆引き）の管理
//! - ユーザー単位・接続単位・全体へのメッセージ送信
//! - 送信に失敗した接続の自動登録解除
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は UI 層が生成した `PusherChannel` を受け取り、送信に使用します。
//!
//! 正引きと逆引きは常に一緒に更新されるため、1 つの `RwLock` で両方を守ります。
//! 送信はロックの外で行います（ロック中に宛先のスナップショットを取り、解放してから送信）。
//! 失敗した接続はその後に短く書き込みロックを取り直して登録解除します。

use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, UserId};

/// 正引き・逆引きインデックス
///
/// 不変条件:
/// - 接続が `owners` にある ⇔ ちょうど 1 人のユーザーの `users` の集合にある
/// - `users` の集合は空にならない（空になった時点でキーごと削除する）
#[derive(Default)]
struct ConnectionIndex {
    users: HashMap<UserId, HashMap<ConnectionId, PusherChannel>>,
    owners: HashMap<ConnectionId, UserId>,
}

impl ConnectionIndex {
    fn insert(&mut self, connection_id: ConnectionId, user_id: UserId, channel: PusherChannel) {
        self.users
            .entry(user_id.clone())
            .or_default()
            .insert(connection_id, channel);
        self.owners.insert(connection_id, user_id);
    }

    fn remove(&mut self, connection_id: ConnectionId) -> Option<UserId> {
        let user_id = self.owners.remove(&connection_id)?;

        let Some(connections) = self.users.get_mut(&user_id) else {
            index_corrupted(connection_id, &user_id);
        };
        if connections.remove(&connection_id).is_none() {
            index_corrupted(connection_id, &user_id);
        }
        if connections.is_empty() {
            self.users.remove(&user_id);
        }

        Some(user_id)
    }

    fn channels_of(&self, user_id: &UserId) -> Vec<(ConnectionId, PusherChannel)> {
        self.users
            .get(user_id)
            .map(|connections| {
                connections
                    .iter()
                    .map(|(id, channel)| (*id, channel.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn channel(&self, connection_id: ConnectionId) -> Option<PusherChannel> {
        let user_id = self.owners.get(&connection_id)?;
        self.users
            .get(user_id)
            .and_then(|connections| connections.get(&connection_id))
            .cloned()
    }

    fn all_channels(&self, exclude: Option<&UserId>) -> Vec<(ConnectionId, PusherChannel)> {
        self.users
            .iter()
            .filter(|(user_id, _)| Some(*user_id) != exclude)
            .flat_map(|(_, connections)| {
                connections
                    .iter()
                    .map(|(id, channel)| (*id, channel.clone()))
            })
            .collect()
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        let forward_total: usize = self.users.values().map(HashMap::len).sum();
        assert_eq!(forward_total, self.owners.len());
        for (user_id, connections) in &self.users {
            assert!(!connections.is_empty(), "empty set left for '{}'", user_id);
            for connection_id in connections.keys() {
                assert_eq!(self.owners.get(connection_id), Some(user_id));
            }
        }
    }
}

fn index_corrupted(connection_id: ConnectionId, user_id: &UserId) -> ! {
    tracing::error!(
        "Connection index corrupted: {} is owned by '{}' but missing from its connection set",
        connection_id,
        user_id
    );
    panic!(
        "connection index corrupted: {} missing from '{}'",
        connection_id, user_id
    );
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// let (tx, rx) = mpsc::channel(OUTBOUND_BUFFER);
/// let connection_id = pusher.register_connection(user_id.clone(), tx).await;
///
/// // ユーザーの全ての接続に送信
/// pusher.push_to_user(&user_id, "{\"type\":\"message\"}").await;
/// ```
pub struct WebSocketMessagePusher {
    index: RwLock<ConnectionIndex>,
    next_connection_id: AtomicU64,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self {
            index: RwLock::new(ConnectionIndex::default()),
            next_connection_id: AtomicU64::new(1),
        }
    }

    /// ロックの外で送信し、成功数と失敗した接続を返す
    fn deliver(
        targets: Vec<(ConnectionId, PusherChannel)>,
        content: &str,
    ) -> (usize, Vec<ConnectionId>) {
        let mut delivered = 0;
        let mut dead = Vec::new();

        for (connection_id, channel) in targets {
            match channel.try_send(content.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!("Failed to push message to {}: {}", connection_id, e);
                    dead.push(connection_id);
                }
            }
        }

        (delivered, dead)
    }

    /// 送信に失敗した接続を登録解除する
    async fn reap(&self, dead: Vec<ConnectionId>) {
        if dead.is_empty() {
            return;
        }

        let mut index = self.index.write().await;
        for connection_id in dead {
            // 所有タスクが先に解除していることもある
            if let Some(user_id) = index.remove(connection_id) {
                tracing::info!(
                    "Reaped dead connection {} of user '{}'",
                    connection_id,
                    user_id
                );
            }
        }
    }

    #[cfg(test)]
    async fn assert_index_consistent(&self) {
        self.index.read().await.assert_consistent();
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, user_id: UserId, channel: PusherChannel) -> ConnectionId {
        let connection_id =
            ConnectionId::new(self.next_connection_id.fetch_add(1, Ordering::Relaxed));

        let mut index = self.index.write().await;
        index.insert(connection_id, user_id.clone(), channel);
        let count = index.users.get(&user_id).map(HashMap::len).unwrap_or(0);

        tracing::info!(
            "Connection {} registered for user '{}' ({} connection(s))",
            connection_id,
            user_id,
            count
        );
        connection_id
    }

    async fn unregister_connection(&self, connection_id: ConnectionId) -> Option<UserId> {
        let removed = self.index.write().await.remove(connection_id);

        match &removed {
            Some(user_id) => {
                tracing::info!(
                    "Connection {} unregistered from user '{}'",
                    connection_id,
                    user_id
                );
            }
            None => {
                tracing::debug!("Connection {} was not registered", connection_id);
            }
        }
        removed
    }

    async fn push_to_connection(&self, connection_id: ConnectionId, content: &str) -> bool {
        let Some(channel) = self.index.read().await.channel(connection_id) else {
            tracing::debug!("Connection {} not found, skipping push", connection_id);
            return false;
        };

        let (delivered, dead) = Self::deliver(vec![(connection_id, channel)], content);
        self.reap(dead).await;
        delivered > 0
    }

    async fn push_to_user(&self, user_id: &UserId, content: &str) -> bool {
        let targets = self.index.read().await.channels_of(user_id);
        if targets.is_empty() {
            tracing::debug!("User '{}' has no live connections", user_id);
            return false;
        }

        let (delivered, dead) = Self::deliver(targets, content);
        self.reap(dead).await;

        if delivered > 0 {
            tracing::debug!(
                "Pushed message to user '{}' ({} connection(s))",
                user_id,
                delivered
            );
            true
        } else {
            tracing::warn!("All connections of user '{}' are gone", user_id);
            false
        }
    }

    async fn broadcast(&self, content: &str, exclude: Option<&UserId>) -> usize {
        let targets = self.index.read().await.all_channels(exclude);

        let (delivered, dead) = Self::deliver(targets, content);
        self.reap(dead).await;

        tracing::debug!("Broadcast delivered to {} connection(s)", delivered);
        delivered
    }

    async fn connection_count_for_user(&self, user_id: &UserId) -> usize {
        self.index
            .read()
            .await
            .users
            .get(user_id)
            .map(HashMap::len)
            .unwrap_or(0)
    }

    async fn total_connection_count(&self) -> usize {
        self.index.read().await.owners.len()
    }

    async fn connected_user_ids(&self) -> HashSet<UserId> {
        self.index.read().await.users.keys().cloned().collect()
    }

    async fn is_user_connected(&self, user_id: &UserId) -> bool {
        self.index.read().await.users.contains_key(user_id)
    }
}

//! UseCase: ユーザー接続処理
//!
//! WebSocket のアップグレードが完了した接続をレジストリに登録し、
//! 新しい接続にだけウェルカムメッセージを送ります。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, UserId};

/// ユーザー接続のユースケース
pub struct ConnectUserUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectUserUseCase {
    /// 新しい ConnectUserUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// ユーザー接続を実行
    ///
    /// ウェルカムメッセージは登録より先にチャネルへ積むため、
    /// 登録直後に届いた通知よりも必ず先に送られます。
    ///
    /// # Arguments
    ///
    /// * `user_id` - 接続するユーザーの ID（Domain Model）
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    /// * `welcome` - 新しい接続にだけ送るウェルカムメッセージ
    ///
    /// # Returns
    ///
    /// 登録された接続の ID
    pub async fn execute(
        &self,
        user_id: UserId,
        sender: PusherChannel,
        welcome: String,
    ) -> ConnectionId {
        if let Err(e) = sender.try_send(welcome) {
            tracing::warn!("Failed to queue welcome for '{}': {}", user_id, e);
        }

        self.message_pusher
            .register_connection(user_id, sender)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::message_pusher::WebSocketMessagePusher;
    use tokio::sync::mpsc;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_connect_registers_connection() {
        // テスト項目: 接続するとレジストリに登録される
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectUserUseCase::new(pusher.clone());
        let (tx, _rx) = mpsc::channel(16);

        // when (操作):
        usecase.execute(user("alice"), tx, "welcome".to_string()).await;

        // then (期待する結果):
        assert!(pusher.is_user_connected(&user("alice")).await);
        assert_eq!(pusher.connection_count_for_user(&user("alice")).await, 1);
    }

    #[tokio::test]
    async fn test_welcome_goes_to_new_connection_only() {
        // テスト項目: ウェルカムメッセージは新しい接続にだけ届き、同じユーザーの既存接続には届かない
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectUserUseCase::new(pusher.clone());
        let (old_tx, mut old_rx) = mpsc::channel(16);
        let (new_tx, mut new_rx) = mpsc::channel(16);
        usecase.execute(user("alice"), old_tx, "first".to_string()).await;
        assert_eq!(old_rx.recv().await, Some("first".to_string()));

        // when (操作):
        usecase.execute(user("alice"), new_tx, "second".to_string()).await;

        // then (期待する結果):
        assert_eq!(new_rx.recv().await, Some("second".to_string()));
        assert!(old_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_welcome_precedes_pushes_after_registration() {
        // テスト項目: 登録直後にユーザー宛ての送信があっても、ウェルカムメッセージが先に届く
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectUserUseCase::new(pusher.clone());
        let (tx, mut rx) = mpsc::channel(16);

        // when (操作):
        usecase.execute(user("alice"), tx, "welcome".to_string()).await;
        pusher.push_to_user(&user("alice"), "new_message").await;

        // then (期待する結果):
        assert_eq!(rx.recv().await, Some("welcome".to_string()));
        assert_eq!(rx.recv().await, Some("new_message".to_string()));
    }
}

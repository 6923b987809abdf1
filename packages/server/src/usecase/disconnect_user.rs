//! UseCase: ユーザー切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUserUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断処理は受信ループの終了理由に関わらず必ず 1 回呼ばれる
//! - 二重に呼ばれても状態を壊さないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：マルチデバイスの一部の切断、最後の接続の切断
//! - エッジケース：送信失敗で既に解除済みの接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, UserId};

/// 切断の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOutcome {
    /// 接続を所有していたユーザー
    pub user_id: UserId,
    /// そのユーザーに残っている接続数
    pub remaining_connections: usize,
}

/// ユーザー切断のユースケース
pub struct DisconnectUserUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUserUseCase {
    /// 新しい DisconnectUserUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// ユーザー切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(DisconnectOutcome)` - 登録を解除した
    /// * `None` - 登録されていなかった（解除済みを含む）
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<DisconnectOutcome> {
        let user_id = self
            .message_pusher
            .unregister_connection(connection_id)
            .await?;

        let remaining_connections = self
            .message_pusher
            .connection_count_for_user(&user_id)
            .await;

        Some(DisconnectOutcome {
            user_id,
            remaining_connections,
        })
    }
}

//! UseCase: メッセージ配信（ディスパッチャ）
//!
//! MessagePusher の上に、メッセージ形式の正規化とグループへのファンアウトを載せます。
//!
//! ## 正規化ルール
//!
//! - `type` がなければ `"message"` を付ける
//! - `timestamp` がなければ現在時刻（JST, RFC 3339）を付ける
//! - 呼び出し側が設定したフィールドは上書きしない
//!
//! MessagePusher は文字列をそのまま送るだけで、形式には関知しません。

use std::sync::Arc;

use hibiki_shared::time::{Clock, timestamp_to_jst_rfc3339};
use serde_json::{Map, Value};

use crate::domain::{MessagePusher, UserId};

/// `type` を省略したメッセージに付ける種別
pub const DEFAULT_MESSAGE_TYPE: &str = "message";

/// メッセージ配信のユースケース
pub struct PushMessageUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 配信時刻の取得元
    clock: Arc<dyn Clock>,
}

impl PushMessageUseCase {
    /// 新しい PushMessageUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// メッセージを正規化する
    ///
    /// オブジェクト以外の値は `content` フィールドに包む。
    pub fn normalize(&self, message: Value) -> Map<String, Value> {
        let mut fields = match message {
            Value::Object(fields) => fields,
            other => {
                let mut fields = Map::new();
                fields.insert("content".to_string(), other);
                fields
            }
        };

        fields
            .entry("type")
            .or_insert_with(|| Value::String(DEFAULT_MESSAGE_TYPE.to_string()));
        fields.entry("timestamp").or_insert_with(|| {
            Value::String(timestamp_to_jst_rfc3339(self.clock.now_jst_millis()))
        });

        fields
    }

    fn encode(&self, message: Value) -> String {
        Value::Object(self.normalize(message)).to_string()
    }

    /// ユーザーの全ての接続にメッセージを送る
    ///
    /// # Returns
    ///
    /// 1 つ以上の接続に届いた場合に `true`
    pub async fn send_to_user(&self, user_id: &UserId, message: Value) -> bool {
        let content = self.encode(message);
        let delivered = self.message_pusher.push_to_user(user_id, &content).await;

        if delivered {
            tracing::info!("Pushed message to user '{}'", user_id);
        } else {
            tracing::warn!("Failed to push message to user '{}' (not connected)", user_id);
        }
        delivered
    }

    /// グループのメンバーにメッセージを送る
    ///
    /// # Arguments
    ///
    /// * `member_ids` - 送信対象のメンバー（グループの参照は呼び出し側が行う）
    /// * `message` - 送信するメッセージ
    /// * `exclude` - 除外するユーザー（通常は送信者）
    ///
    /// # Returns
    ///
    /// メッセージが届いたユーザー数（接続数ではない）
    pub async fn send_to_group(
        &self,
        member_ids: &[UserId],
        message: Value,
        exclude: Option<&UserId>,
    ) -> usize {
        if member_ids.is_empty() {
            tracing::info!("No group members to notify, skipping");
            return 0;
        }

        // 正規化とシリアライズは 1 回だけ
        let content = self.encode(message);

        let mut delivered = 0;
        for member_id in member_ids {
            if Some(member_id) == exclude {
                continue;
            }
            if self.message_pusher.push_to_user(member_id, &content).await {
                delivered += 1;
            }
        }

        tracing::info!(
            "Pushed message to {} of {} group member(s)",
            delivered,
            member_ids.len()
        );
        delivered
    }

    /// 接続中の全員にメッセージを送る
    ///
    /// # Returns
    ///
    /// メッセージが届いた接続数
    pub async fn broadcast(&self, message: Value, exclude: Option<&UserId>) -> usize {
        let content = self.encode(message);
        let delivered = self.message_pusher.broadcast(&content, exclude).await;
        tracing::info!("Broadcast delivered to {} connection(s)", delivered);
        delivered
    }
}

//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() / notify_group() メソッド
//! - メッセージ作成（グループの存在確認、送信者のメンバー確認、保存）
//! - グループメンバーへの通知（送信者の除外）
//!
//! ### なぜこのテストが必要か
//! - 作成に失敗した場合は送信者にだけエラーを返し、他のメンバーには何も届けない
//! - メンバー一覧の取得に失敗しても、保存済みのメッセージは失われない
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージの保存とファンアウト
//! - 異常系：グループが存在しない、送信者がメンバーでない、保存に失敗
//! - エッジケース：メンバー一覧の取得失敗

use std::sync::Arc;

use hibiki_shared::time::Clock;
use serde_json::Value;

use crate::domain::{
    ChatMessage, GroupId, GroupRepository, MessageContent, MessageIdFactory, MessageRepository,
    Timestamp, UserId,
};

use super::{error::SendMessageError, push_message::PushMessageUseCase};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// GroupRepository（グループとメンバーシップ）
    group_repository: Arc<dyn GroupRepository>,
    /// MessageRepository（メッセージの保存）
    message_repository: Arc<dyn MessageRepository>,
    /// PushMessageUseCase（メンバーへの通知）
    push_message_usecase: Arc<PushMessageUseCase>,
    /// 作成時刻の取得元
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        message_repository: Arc<dyn MessageRepository>,
        push_message_usecase: Arc<PushMessageUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            group_repository,
            message_repository,
            push_message_usecase,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者のユーザー ID（Domain Model）
    /// * `group_id` - 送信先グループの ID（Domain Model）
    /// * `content` - メッセージ内容（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 保存されたメッセージ
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        from: UserId,
        group_id: GroupId,
        content: MessageContent,
    ) -> Result<ChatMessage, SendMessageError> {
        // 1. グループの存在確認
        let group = self
            .group_repository
            .find_group(&group_id)
            .await
            .map_err(|e| SendMessageError::Repository(e.to_string()))?
            .ok_or_else(|| SendMessageError::GroupNotFound(group_id.as_str().to_string()))?;

        // 2. 送信者がメンバーかどうか
        if !group.is_member(&from) {
            return Err(SendMessageError::NotGroupMember {
                user_id: from.into_string(),
                group_id: group_id.into_string(),
            });
        }

        // 3. メッセージを保存
        let now = Timestamp::new(self.clock.now_jst_millis());
        let message = ChatMessage::new(
            MessageIdFactory::generate(now),
            group_id,
            from,
            content,
            now,
        );
        let message = self
            .message_repository
            .create_message(message)
            .await
            .map_err(|e| SendMessageError::Repository(e.to_string()))?;

        tracing::info!(
            "Message '{}' stored in group '{}' from '{}'",
            message.id.as_str(),
            message.group_id,
            message.from
        );
        Ok(message)
    }

    /// グループの他のメンバーに新着メッセージを通知
    ///
    /// # Arguments
    ///
    /// * `message` - 保存済みのメッセージ（送信者は通知対象から除外）
    /// * `notification` - 送信する通知（DTO 層で生成されたもの）
    ///
    /// # Returns
    ///
    /// 通知が届いたメンバー数
    pub async fn notify_group(&self, message: &ChatMessage, notification: Value) -> usize {
        let member_ids = match self.group_repository.get_member_ids(&message.group_id).await {
            Ok(member_ids) => member_ids,
            Err(e) => {
                tracing::warn!(
                    "Failed to look up members of group '{}': {}",
                    message.group_id,
                    e
                );
                return 0;
            }
        };

        self.push_message_usecase
            .send_to_group(&member_ids, notification, Some(&message.from))
            .await
    }
}

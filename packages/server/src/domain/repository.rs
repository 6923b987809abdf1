//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatMessage, Group, GroupId, MessageId, RepositoryError, UserId};

/// Group Repository trait
///
/// グループとメンバーシップの参照・更新。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// グループを作成
    async fn create_group(&self, group: Group) -> Result<Group, RepositoryError>;

    /// グループを取得（存在しない場合は `None`）
    async fn find_group(&self, group_id: &GroupId) -> Result<Option<Group>, RepositoryError>;

    /// メンバーを追加し、更新後のグループを返す
    async fn add_member(
        &self,
        group_id: &GroupId,
        user_id: UserId,
    ) -> Result<Group, RepositoryError>;

    /// メンバーの ID を参加順に取得
    async fn get_member_ids(&self, group_id: &GroupId) -> Result<Vec<UserId>, RepositoryError>;
}

/// Message Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// メッセージを保存
    async fn create_message(&self, message: ChatMessage) -> Result<ChatMessage, RepositoryError>;

    /// メッセージを 1 件取得（存在しない場合は `None`）
    async fn find_message(
        &self,
        message_id: &MessageId,
    ) -> Result<Option<ChatMessage>, RepositoryError>;

    /// グループのメッセージを新しい順にページ単位で取得
    ///
    /// 戻り値は `(ページ内のメッセージ, 総件数)`。`page` は 1 始まり。
    async fn list_messages_by_group(
        &self,
        group_id: &GroupId,
        page: usize,
        page_size: usize,
    ) -> Result<(Vec<ChatMessage>, usize), RepositoryError>;
}

//! UseCase: グループへのメンバー追加

use std::sync::Arc;

use crate::domain::{Group, GroupId, GroupRepository, UserId};

use super::error::GroupError;

/// メンバー追加のユースケース
pub struct AddGroupMemberUseCase {
    /// GroupRepository（メンバーシップの更新）
    group_repository: Arc<dyn GroupRepository>,
}

impl AddGroupMemberUseCase {
    /// 新しい AddGroupMemberUseCase を作成
    pub fn new(group_repository: Arc<dyn GroupRepository>) -> Self {
        Self { group_repository }
    }

    /// メンバー追加を実行
    ///
    /// 既にメンバーの場合もエラーにはせず、現在のグループを返す。
    pub async fn execute(&self, group_id: GroupId, user_id: UserId) -> Result<Group, GroupError> {
        let group = self.group_repository.add_member(&group_id, user_id).await?;
        tracing::info!(
            "Group '{}' now has {} member(s)",
            group.id,
            group.member_ids.len()
        );
        Ok(group)
    }
}

//! UseCase: グループ作成処理

use std::sync::Arc;

use hibiki_shared::time::Clock;

use crate::domain::{Group, GroupId, GroupIdFactory, GroupName, GroupRepository, Timestamp, UserId};

use super::error::GroupError;

/// グループ作成のユースケース
pub struct CreateGroupUseCase {
    /// GroupRepository（グループの保存）
    group_repository: Arc<dyn GroupRepository>,
    /// 作成時刻の取得元
    clock: Arc<dyn Clock>,
}

impl CreateGroupUseCase {
    /// 新しい CreateGroupUseCase を作成
    pub fn new(group_repository: Arc<dyn GroupRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            group_repository,
            clock,
        }
    }

    /// グループ作成を実行
    ///
    /// # Arguments
    ///
    /// * `group_id` - 指定がなければ自動生成
    /// * `name` - グループ名
    /// * `member_ids` - 初期メンバー（重複は 1 人として扱う）
    pub async fn execute(
        &self,
        group_id: Option<GroupId>,
        name: GroupName,
        member_ids: Vec<UserId>,
    ) -> Result<Group, GroupError> {
        let now = Timestamp::new(self.clock.now_jst_millis());
        let group_id = group_id.unwrap_or_else(|| GroupIdFactory::generate(now));

        let mut group = Group::new(group_id, name, now);
        for member_id in member_ids {
            group.add_member(member_id);
        }

        let group = self.group_repository.create_group(group).await?;
        tracing::info!(
            "Group '{}' created with {} member(s)",
            group.id,
            group.member_ids.len()
        );
        Ok(group)
    }
}

//! UseCase: グループ詳細取得

use std::sync::Arc;

use crate::domain::{Group, GroupId, GroupRepository};

use super::error::GroupError;

/// グループ詳細取得のユースケース
pub struct GetGroupDetailUseCase {
    group_repository: Arc<dyn GroupRepository>,
}

impl GetGroupDetailUseCase {
    pub fn new(group_repository: Arc<dyn GroupRepository>) -> Self {
        Self { group_repository }
    }

    pub async fn execute(&self, group_id: GroupId) -> Result<Group, GroupError> {
        self.group_repository
            .find_group(&group_id)
            .await?
            .ok_or_else(|| GroupError::NotFound(group_id.into_string()))
    }
}

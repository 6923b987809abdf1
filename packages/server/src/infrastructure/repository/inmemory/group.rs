//! InMemory Group Repository 実装
//!
//! ドメイン層が定義する GroupRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Group, GroupId, GroupRepository, RepositoryError, UserId};

/// インメモリ Group Repository 実装
#[derive(Default)]
pub struct InMemoryGroupRepository {
    /// GroupId → Group
    groups: Mutex<HashMap<GroupId, Group>>,
}

impl InMemoryGroupRepository {
    /// 新しい InMemoryGroupRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn create_group(&self, group: Group) -> Result<Group, RepositoryError> {
        let mut groups = self.groups.lock().await;
        if groups.contains_key(&group.id) {
            return Err(RepositoryError::DuplicateGroup(group.id.into_string()));
        }
        groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn find_group(&self, group_id: &GroupId) -> Result<Option<Group>, RepositoryError> {
        let groups = self.groups.lock().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn add_member(
        &self,
        group_id: &GroupId,
        user_id: UserId,
    ) -> Result<Group, RepositoryError> {
        let mut groups = self.groups.lock().await;
        let group = groups
            .get_mut(group_id)
            .ok_or_else(|| RepositoryError::GroupNotFound(group_id.as_str().to_string()))?;
        group.add_member(user_id);
        Ok(group.clone())
    }

    async fn get_member_ids(&self, group_id: &GroupId) -> Result<Vec<UserId>, RepositoryError> {
        let groups = self.groups.lock().await;
        groups
            .get(group_id)
            .map(|group| group.member_ids.clone())
            .ok_or_else(|| RepositoryError::GroupNotFound(group_id.as_str().to_string()))
    }
}

//! UseCase: グループのメッセージ履歴取得
//!
//! ページは 1 始まりで、新しいメッセージから順に返します。

use std::sync::Arc;

use crate::domain::{ChatMessage, GroupId, GroupRepository, MessageRepository};

use super::error::GetMessagesError;

/// 1 ページあたりの最大件数
pub const MAX_PAGE_SIZE: usize = 100;

/// メッセージ履歴の 1 ページ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePage {
    pub messages: Vec<ChatMessage>,
    /// グループ内の総件数
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

/// メッセージ履歴取得のユースケース
pub struct GetMessagesUseCase {
    group_repository: Arc<dyn GroupRepository>,
    message_repository: Arc<dyn MessageRepository>,
}

impl GetMessagesUseCase {
    /// 新しい GetMessagesUseCase を作成
    pub fn new(
        group_repository: Arc<dyn GroupRepository>,
        message_repository: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            group_repository,
            message_repository,
        }
    }

    /// メッセージ履歴取得を実行
    ///
    /// # Errors
    ///
    /// * `GroupNotFound` - グループが存在しない
    /// * `InvalidPage` / `InvalidPageSize` - ページ指定が範囲外
    pub async fn execute(
        &self,
        group_id: GroupId,
        page: usize,
        page_size: usize,
    ) -> Result<MessagePage, GetMessagesError> {
        let group = self
            .group_repository
            .find_group(&group_id)
            .await
            .map_err(|e| GetMessagesError::Repository(e.to_string()))?;
        if group.is_none() {
            return Err(GetMessagesError::GroupNotFound(group_id.into_string()));
        }

        if page == 0 {
            return Err(GetMessagesError::InvalidPage(page));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(GetMessagesError::InvalidPageSize {
                max: MAX_PAGE_SIZE,
                actual: page_size,
            });
        }

        let (messages, total) = self
            .message_repository
            .list_messages_by_group(&group_id, page, page_size)
            .await
            .map_err(|e| GetMessagesError::Repository(e.to_string()))?;

        Ok(MessagePage {
            messages,
            total,
            page,
            page_size,
        })
    }
}

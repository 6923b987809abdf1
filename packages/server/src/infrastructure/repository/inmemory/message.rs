//! InMemory Message Repository 実装
//!
//! メッセージは保存順に Vec に追記し、取得時に新しい順へ並べ替えます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, GroupId, MessageId, MessageRepository, RepositoryError};

/// インメモリ Message Repository 実装
#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create_message(&self, message: ChatMessage) -> Result<ChatMessage, RepositoryError> {
        let mut messages = self.messages.lock().await;
        messages.push(message.clone());
        Ok(message)
    }

    async fn find_message(
        &self,
        message_id: &MessageId,
    ) -> Result<Option<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .find(|message| &message.id == message_id)
            .cloned())
    }

    async fn list_messages_by_group(
        &self,
        group_id: &GroupId,
        page: usize,
        page_size: usize,
    ) -> Result<(Vec<ChatMessage>, usize), RepositoryError> {
        let messages = self.messages.lock().await;

        // 同時刻のメッセージは後から保存されたものを先に
        let mut in_group: Vec<&ChatMessage> = messages
            .iter()
            .rev()
            .filter(|message| &message.group_id == group_id)
            .collect();
        in_group.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = in_group.len();
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let page_messages = in_group
            .into_iter()
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect();

        Ok((page_messages, total))
    }
}

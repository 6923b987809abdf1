//! UseCase: メッセージ 1 件の取得

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageId, MessageRepository};

use super::error::GetMessageError;

/// メッセージ取得のユースケース
pub struct GetMessageUseCase {
    message_repository: Arc<dyn MessageRepository>,
}

impl GetMessageUseCase {
    pub fn new(message_repository: Arc<dyn MessageRepository>) -> Self {
        Self { message_repository }
    }

    pub async fn execute(&self, message_id: MessageId) -> Result<ChatMessage, GetMessageError> {
        self.message_repository
            .find_message(&message_id)
            .await
            .map_err(|e| GetMessageError::Repository(e.to_string()))?
            .ok_or_else(|| GetMessageError::NotFound(message_id.into_string()))
    }
}

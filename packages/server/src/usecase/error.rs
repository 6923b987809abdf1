//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("group '{0}' not found")]
    GroupNotFound(String),

    #[error("user '{user_id}' is not a member of group '{group_id}'")]
    NotGroupMember { user_id: String, group_id: String },

    #[error("invalid message: {0}")]
    Validation(String),

    #[error("failed to store message: {0}")]
    Repository(String),
}

impl From<ValueObjectError> for SendMessageError {
    fn from(error: ValueObjectError) -> Self {
        SendMessageError::Validation(error.to_string())
    }
}

impl SendMessageError {
    /// クライアントに返すエラーコード
    pub fn code(&self) -> &'static str {
        match self {
            SendMessageError::GroupNotFound(_) | SendMessageError::NotGroupMember { .. } => {
                "NOT_FOUND"
            }
            SendMessageError::Validation(_) => "VALIDATION_ERROR",
            SendMessageError::Repository(_) => "SEND_MESSAGE_FAILED",
        }
    }
}

/// グループ操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("group '{0}' not found")]
    NotFound(String),

    #[error("group '{0}' already exists")]
    Duplicate(String),

    #[error("repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for GroupError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::GroupNotFound(id) => GroupError::NotFound(id),
            RepositoryError::DuplicateGroup(id) => GroupError::Duplicate(id),
            RepositoryError::Storage(message) => GroupError::Repository(message),
        }
    }
}

/// メッセージ履歴取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetMessagesError {
    #[error("group '{0}' not found")]
    GroupNotFound(String),

    #[error("page must be >= 1 (got {0})")]
    InvalidPage(usize),

    #[error("page_size must be between 1 and {max} (got {actual})")]
    InvalidPageSize { max: usize, actual: usize },

    #[error("repository error: {0}")]
    Repository(String),
}

/// メッセージ取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetMessageError {
    #[error("message '{0}' not found")]
    NotFound(String),

    #[error("repository error: {0}")]
    Repository(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_error_codes() {
        // テスト項目: エラーごとにクライアントへ返すコードが決まる
        // given (前提条件):
        let not_member = SendMessageError::NotGroupMember {
            user_id: "mallory".to_string(),
            group_id: "group_001".to_string(),
        };
        let validation: SendMessageError = ValueObjectError::EmptyMessageContent.into();

        // when (操作):
        // then (期待する結果):
        assert_eq!(
            SendMessageError::GroupNotFound("g".to_string()).code(),
            "NOT_FOUND"
        );
        assert_eq!(not_member.code(), "NOT_FOUND");
        assert_eq!(validation.code(), "VALIDATION_ERROR");
        assert_eq!(
            SendMessageError::Repository("down".to_string()).code(),
            "SEND_MESSAGE_FAILED"
        );
    }

    #[test]
    fn test_group_error_from_repository_error() {
        // テスト項目: RepositoryError がグループ操作のエラーに変換される
        // given (前提条件):
        let duplicate = RepositoryError::DuplicateGroup("g1".to_string());

        // when (操作):
        let error: GroupError = duplicate.into();

        // then (期待する結果):
        assert_eq!(error, GroupError::Duplicate("g1".to_string()));
    }
}

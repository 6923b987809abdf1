//! Domain error types.

use thiserror::Error;

/// 値オブジェクト生成時のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("user_id must not be empty")]
    EmptyUserId,

    #[error("group_id must not be empty")]
    EmptyGroupId,

    #[error("group_id must be at most {max} characters (got {actual})")]
    GroupIdTooLong { max: usize, actual: usize },

    #[error("group name must not be empty")]
    EmptyGroupName,

    #[error("group name must be at most {max} characters (got {actual})")]
    GroupNameTooLong { max: usize, actual: usize },

    #[error("message content must not be empty")]
    EmptyMessageContent,

    #[error("message content must be at most {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("group '{0}' not found")]
    GroupNotFound(String),

    #[error("group '{0}' already exists")]
    DuplicateGroup(String),

    #[error("storage error: {0}")]
    Storage(String),
}

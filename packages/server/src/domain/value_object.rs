//! Value objects.
//!
//! Identifiers and content are validated once at the boundary; everything
//! past that point can rely on the invariants held by these types.

use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a group id (characters)
pub const GROUP_ID_MAX_LENGTH: usize = 64;
/// Maximum length of a group name (characters)
pub const GROUP_NAME_MAX_LENGTH: usize = 128;
/// Maximum length of a message body (characters)
pub const MESSAGE_CONTENT_MAX_LENGTH: usize = 5000;

/// Logical user identity.
///
/// Opaque to the server: any non-blank string is accepted. One user may hold
/// several live connections at once (multi-device login).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyUserId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one live connection.
///
/// Assigned by the registry from a monotonically increasing counter and never
/// reused, so it is a stable key for the reverse index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Group identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyGroupId);
        }
        let length = value.chars().count();
        if length > GROUP_ID_MAX_LENGTH {
            return Err(ValueObjectError::GroupIdTooLong {
                max: GROUP_ID_MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for GroupId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Group display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupName(String);

impl GroupName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyGroupName);
        }
        let length = value.chars().count();
        if length > GROUP_NAME_MAX_LENGTH {
            return Err(ValueObjectError::GroupNameTooLong {
                max: GROUP_NAME_MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for GroupName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Message identifier (`msg_<YYYYMMDDHHMMSS>_<uuid>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Wrap an already generated identifier.
    ///
    /// New identifiers come from `MessageIdFactory`.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyMessageContent);
        }
        let length = value.chars().count();
        if length > MESSAGE_CONTENT_MAX_LENGTH {
            return Err(ValueObjectError::MessageContentTooLong {
                max: MESSAGE_CONTENT_MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_rejects_blank() {
        // テスト項目: 空白のみの user_id は拒否される
        // given (前提条件):
        let values = ["".to_string(), "   ".to_string()];

        // when (操作):
        let results: Vec<_> = values.into_iter().map(UserId::new).collect();

        // then (期待する結果):
        for result in results {
            assert_eq!(result, Err(ValueObjectError::EmptyUserId));
        }
    }

    #[test]
    fn test_user_id_accepts_opaque_string() {
        // テスト項目: 形式に関わらず空でない文字列は user_id として受け付けられる
        // given (前提条件):
        let raw = "user:42@device-a".to_string();

        // when (操作):
        let user_id = UserId::try_from(raw.clone()).unwrap();

        // then (期待する結果):
        assert_eq!(user_id.as_str(), raw);
        assert_eq!(user_id.to_string(), raw);
    }

    #[test]
    fn test_group_id_length_limit() {
        // テスト項目: 64 文字を超える group_id は拒否される
        // given (前提条件):
        let ok = "g".repeat(GROUP_ID_MAX_LENGTH);
        let too_long = "g".repeat(GROUP_ID_MAX_LENGTH + 1);

        // when (操作):
        let ok_result = GroupId::new(ok);
        let err_result = GroupId::new(too_long);

        // then (期待する結果):
        assert!(ok_result.is_ok());
        assert_eq!(
            err_result,
            Err(ValueObjectError::GroupIdTooLong {
                max: GROUP_ID_MAX_LENGTH,
                actual: GROUP_ID_MAX_LENGTH + 1,
            })
        );
    }

    #[test]
    fn test_message_content_counts_characters_not_bytes() {
        // テスト項目: メッセージ長はバイト数ではなく文字数で判定される
        // given (前提条件):
        let multibyte = "あ".repeat(MESSAGE_CONTENT_MAX_LENGTH);

        // when (操作):
        let result = MessageContent::new(multibyte);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_message_content_rejects_empty_and_too_long() {
        // テスト項目: 空白だけのメッセージと長すぎるメッセージは拒否される
        // given (前提条件):
        let too_long = "a".repeat(MESSAGE_CONTENT_MAX_LENGTH + 1);

        // when (操作):
        let empty = MessageContent::new(String::new());
        let blank = MessageContent::new(" \n ".to_string());
        let long = MessageContent::new(too_long);

        // then (期待する結果):
        assert_eq!(empty, Err(ValueObjectError::EmptyMessageContent));
        assert_eq!(blank, Err(ValueObjectError::EmptyMessageContent));
        assert!(matches!(
            long,
            Err(ValueObjectError::MessageContentTooLong { .. })
        ));
    }

    #[test]
    fn test_connection_id_display() {
        // テスト項目: ConnectionId はログ向けに conn-<n> 形式で表示される
        // given (前提条件):
        let id = ConnectionId::new(7);

        // when (操作):
        let displayed = id.to_string();

        // then (期待する結果):
        assert_eq!(displayed, "conn-7");
        assert_eq!(id.value(), 7);
    }
}

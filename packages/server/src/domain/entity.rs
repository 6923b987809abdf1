//! Entities.

use super::value_object::{GroupId, GroupName, MessageContent, MessageId, Timestamp, UserId};

/// A chat group and its members, in join order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: GroupName,
    pub member_ids: Vec<UserId>,
    pub created_at: Timestamp,
}

impl Group {
    pub fn new(id: GroupId, name: GroupName, created_at: Timestamp) -> Self {
        Self {
            id,
            name,
            member_ids: Vec::new(),
            created_at,
        }
    }

    /// メンバーを追加する
    ///
    /// 既にメンバーの場合は何もせず `false` を返す。
    pub fn add_member(&mut self, user_id: UserId) -> bool {
        if self.is_member(&user_id) {
            return false;
        }
        self.member_ids.push(user_id);
        true
    }

    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.member_ids.iter().any(|id| id == user_id)
    }
}

/// Kind of a stored message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "TEXT",
        }
    }
}

/// A message posted to a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub group_id: GroupId,
    pub from: UserId,
    pub kind: MessageKind,
    pub content: MessageContent,
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        group_id: GroupId,
        from: UserId,
        content: MessageContent,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            group_id,
            from,
            kind: MessageKind::Text,
            content,
            created_at,
        }
    }
}

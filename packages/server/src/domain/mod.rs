//! ドメイン層
//!
//! 値オブジェクト、エンティティ、および Infrastructure 層が実装する
//! trait（Repository, MessagePusher）を定義します。

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Group, MessageKind};
pub use error::{RepositoryError, ValueObjectError};
pub use factory::{GroupIdFactory, MessageIdFactory};
pub use message_pusher::{MessagePusher, OUTBOUND_BUFFER, PusherChannel};
pub use repository::{GroupRepository, MessageRepository};
#[cfg(test)]
pub use repository::{MockGroupRepository, MockMessageRepository};
pub use value_object::{
    ConnectionId, GroupId, GroupName, MessageContent, MessageId, Timestamp, UserId,
};

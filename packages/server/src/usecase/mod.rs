//! UseCase 層
//!
//! ドメイン層の trait（Repository, MessagePusher）だけに依存し、
//! UI 層から呼び出されるアプリケーションの操作を提供します。

mod add_group_member;
mod connect_user;
mod create_group;
mod disconnect_user;
mod error;
mod get_connection_stats;
mod get_group_detail;
mod get_message;
mod get_messages;
mod push_message;
mod send_message;

pub use add_group_member::AddGroupMemberUseCase;
pub use connect_user::ConnectUserUseCase;
pub use create_group::CreateGroupUseCase;
pub use disconnect_user::{DisconnectOutcome, DisconnectUserUseCase};
pub use error::{GetMessageError, GetMessagesError, GroupError, SendMessageError};
pub use get_connection_stats::{ConnectionStats, GetConnectionStatsUseCase};
pub use get_group_detail::GetGroupDetailUseCase;
pub use get_message::GetMessageUseCase;
pub use get_messages::{GetMessagesUseCase, MAX_PAGE_SIZE, MessagePage};
pub use push_message::{DEFAULT_MESSAGE_TYPE, PushMessageUseCase};
pub use send_message::SendMessageUseCase;

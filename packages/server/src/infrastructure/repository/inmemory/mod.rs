//! インメモリ Repository 実装
//!
//! プロセス再起動でデータは失われます。

mod group;
mod message;

pub use group::InMemoryGroupRepository;
pub use message::InMemoryMessageRepository;

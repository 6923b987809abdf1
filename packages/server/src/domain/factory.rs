//! Identifier factories.

use uuid::Uuid;

use hibiki_shared::time::timestamp_to_jst_compact;

use super::value_object::{GroupId, MessageId, Timestamp};

fn generate_id(prefix: &str, now: Timestamp) -> String {
    format!(
        "{}_{}_{}",
        prefix,
        timestamp_to_jst_compact(now.value()),
        Uuid::new_v4().simple()
    )
}

/// MessageId の生成
pub struct MessageIdFactory;

impl MessageIdFactory {
    pub fn generate(now: Timestamp) -> MessageId {
        MessageId::new(generate_id("msg", now))
    }
}

/// GroupId の生成
pub struct GroupIdFactory;

impl GroupIdFactory {
    pub fn generate(now: Timestamp) -> GroupId {
        // "group_" + 14 + "_" + 32 = 53 characters, always within the limit
        GroupId::new(generate_id("group", now)).expect("generated group id is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id_format() {
        // テスト項目: MessageId が msg_<時刻>_<uuid> 形式で生成される
        // given (前提条件):
        // 2023-01-01 00:00:00 JST
        let now = Timestamp::new(1672498800000);

        // when (操作):
        let id = MessageIdFactory::generate(now);

        // then (期待する結果):
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "msg");
        assert_eq!(parts[1], "20230101000000");
        assert_eq!(parts[2].len(), 32);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        // テスト項目: 同じ時刻でも異なる ID が生成される
        // given (前提条件):
        let now = Timestamp::new(1672498800000);

        // when (操作):
        let a = MessageIdFactory::generate(now);
        let b = MessageIdFactory::generate(now);
        let group = GroupIdFactory::generate(now);

        // then (期待する結果):
        assert_ne!(a, b);
        assert!(group.as_str().starts_with("group_20230101000000_"));
    }
}

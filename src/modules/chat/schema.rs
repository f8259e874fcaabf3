use serde::Serialize;
use sqlx::prelude::FromRow;

/// A stored row. `seq` is the insertion sequence and only orders rows that
/// share a `sent_at`; it never leaves the store layer.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MessageEntity {
    pub seq: i64,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub message_text: String,
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub sender_id: i32,
    pub receiver_id: i32,
    pub text: String,
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

impl From<MessageEntity> for Message {
    fn from(entity: MessageEntity) -> Self {
        Message {
            sender_id: entity.sender_id,
            receiver_id: entity.receiver_id,
            text: entity.message_text,
            sent_at: entity.sent_at,
        }
    }
}

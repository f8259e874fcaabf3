use crate::{
    api::error,
    modules::chat::{
        conversation::ParticipantPair, model::ValidatedMessage, schema::MessageEntity,
    },
};

/// Persistence boundary for chat messages. Every method is a single statement
/// against the backing store; delete methods report the number of rows removed.
/// Find methods return rows already in timeline order (`sent_at`, then `seq`).
#[async_trait::async_trait]
pub trait MessageRepository {
    async fn create(
        &self,
        message: &ValidatedMessage,
    ) -> Result<MessageEntity, error::SystemError>;

    async fn find_by_receiver(
        &self,
        receiver_id: i32,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;

    async fn find_conversation(
        &self,
        pair: &ParticipantPair,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;

    async fn delete_conversation(&self, pair: &ParticipantPair) -> Result<u64, error::SystemError>;

    async fn delete_by_user(&self, user_id: i32) -> Result<u64, error::SystemError>;
}

use log::{info, warn};
use std::sync::Arc;

use crate::api::error::{self, ValidationError};
use crate::modules::chat::{
    conversation::ParticipantPair,
    model::{require_positive, validate, Conversation, NewMessage},
    repository::MessageRepository,
    schema::{Message, MessageEntity},
};

#[derive(Clone)]
pub struct ChatService {
    repo: Arc<dyn MessageRepository + Send + Sync>,
}

fn rejected(operation: &'static str) -> impl Fn(ValidationError) -> error::SystemError {
    move |err| {
        warn!("{operation} rejected on {}: {err}", err.field());
        error::SystemError::Validation(err)
    }
}

fn into_messages(rows: Vec<MessageEntity>) -> Vec<Message> {
    rows.into_iter().map(Message::from).collect()
}

impl ChatService {
    pub fn with_dependencies(repo: Arc<dyn MessageRepository + Send + Sync>) -> Self {
        info!("ChatService initialized with dependencies");
        ChatService { repo }
    }

    /// Validates the candidate and stores it. Not idempotent: every call adds a row.
    pub async fn append(
        &self,
        candidate: Option<&NewMessage>,
    ) -> Result<Message, error::SystemError> {
        let message = validate(candidate).map_err(rejected("append"))?;
        let stored = self.repo.create(&message).await?;
        info!(
            "Message {} -> {} stored at {}",
            stored.sender_id, stored.receiver_id, stored.sent_at
        );
        Ok(Message::from(stored))
    }

    /// Messages addressed to `receiver_id`, oldest first. No messages is not an error.
    pub async fn list_received(
        &self,
        receiver_id: i32,
    ) -> Result<Vec<Message>, error::SystemError> {
        let receiver_id = require_positive("receiver_id", receiver_id).map_err(rejected("list"))?;
        let rows = self.repo.find_by_receiver(receiver_id).await?;
        Ok(into_messages(rows))
    }

    /// Both directions between the two users merged into one timeline.
    /// The argument order does not change the result.
    pub async fn get_conversation(
        &self,
        user_a: i32,
        user_b: i32,
    ) -> Result<Conversation, error::SystemError> {
        let pair = ParticipantPair::new(user_a, user_b).map_err(rejected("conversation"))?;
        let rows = self.repo.find_conversation(&pair).await?;
        Ok(Conversation { participants: pair, messages: into_messages(rows) })
    }

    /// Deletes every message between the two users. Zero rows is reported as `NotFound`.
    pub async fn clear_conversation(
        &self,
        user_a: i32,
        user_b: i32,
    ) -> Result<u64, error::SystemError> {
        let pair = ParticipantPair::new(user_a, user_b).map_err(rejected("clear conversation"))?;
        let rows = self.repo.delete_conversation(&pair).await?;
        if rows == 0 {
            return Err(error::SystemError::not_found("No messages found to delete"));
        }
        info!("Cleared {rows} message(s) between {} and {}", pair.low(), pair.high());
        Ok(rows)
    }

    /// Deletes every message the user sent or received. Zero rows is reported as `NotFound`.
    pub async fn clear_all_for_user(&self, user_id: i32) -> Result<u64, error::SystemError> {
        let user_id = require_positive("user_id", user_id).map_err(rejected("clear user"))?;
        let rows = self.repo.delete_by_user(user_id).await?;
        if rows == 0 {
            return Err(error::SystemError::not_found("No messages found to delete"));
        }
        info!("Cleared {rows} message(s) for user {user_id}");
        Ok(rows)
    }
}

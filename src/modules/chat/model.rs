use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    constants::MESSAGE_MAX_LENGTH,
    modules::chat::{conversation::ParticipantPair, schema::Message},
};

/// A message as submitted by a caller, before any admission rule is applied.
/// Missing ids deserialize to `0` so they fail the positivity checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewMessage {
    pub sender_id: i32,
    pub receiver_id: i32,
    pub text: Option<String>,
}

/// A message that passed every admission rule. Only [`validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMessage {
    sender_id: i32,
    receiver_id: i32,
    text: String,
}

impl ValidatedMessage {
    pub fn sender_id(&self) -> i32 {
        self.sender_id
    }

    pub fn receiver_id(&self) -> i32 {
        self.receiver_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

pub fn require_positive(field: &'static str, value: i32) -> Result<i32, ValidationError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ValidationError::NonPositiveId { field, value })
    }
}

/// Applies the admission rules in order and stops at the first failure.
/// The text is kept as supplied; trimming only decides emptiness.
pub fn validate(candidate: Option<&NewMessage>) -> Result<ValidatedMessage, ValidationError> {
    let candidate = candidate.ok_or(ValidationError::MissingMessage)?;

    let text = match candidate.text.as_deref() {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(ValidationError::EmptyText),
    };

    let sender_id = require_positive("sender_id", candidate.sender_id)?;
    let receiver_id = require_positive("receiver_id", candidate.receiver_id)?;

    if sender_id == receiver_id {
        return Err(ValidationError::SelfMessage { user_id: sender_id });
    }

    let length = text.chars().count();
    if length > MESSAGE_MAX_LENGTH {
        return Err(ValidationError::TextTooLong { length });
    }

    // PostgreSQL text columns cannot hold U+0000
    if text.contains('\0') {
        return Err(ValidationError::NulInText);
    }

    Ok(ValidatedMessage { sender_id, receiver_id, text: text.to_string() })
}

#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub participants: ParticipantPair,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub rows_deleted: u64,
}

//! In-memory implementation of [`MessageRepository`] for tests.
//!
//! Mirrors the SQL store: a strictly increasing `seq`, a non-decreasing
//! `sent_at`, and single-step bulk deletes under one write lock.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    api::error,
    modules::chat::{
        conversation::ParticipantPair,
        model::ValidatedMessage,
        repository::MessageRepository,
        schema::MessageEntity,
    },
};

/// True when the row was sent from one participant to the other, in either direction.
fn between(pair: &ParticipantPair, row: &MessageEntity) -> bool {
    (row.sender_id == pair.low() && row.receiver_id == pair.high())
        || (row.sender_id == pair.high() && row.receiver_id == pair.low())
}

/// Same order as `ORDER BY sent_at ASC, seq ASC`.
fn order_timeline(rows: &mut [MessageEntity]) {
    rows.sort_by_key(|row| (row.sent_at, row.seq));
}

#[derive(Debug, Default)]
struct State {
    rows: Vec<MessageEntity>,
    next_seq: i64,
    last_sent_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    state: RwLock<State>,
    frozen_clock: Option<DateTime<Utc>>,
    unavailable: bool,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert gets the same `sent_at`, so ordering falls back to `seq`.
    pub fn with_frozen_clock(at: DateTime<Utc>) -> Self {
        Self { frozen_clock: Some(at), ..Self::default() }
    }

    /// Every call fails as if the database could not be reached.
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    fn check_available(&self) -> Result<(), error::SystemError> {
        if self.unavailable {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }

    fn select<F>(rows: &[MessageEntity], predicate: F) -> Vec<MessageEntity>
    where
        F: Fn(&MessageEntity) -> bool,
    {
        let mut selected: Vec<MessageEntity> =
            rows.iter().filter(|row| predicate(row)).cloned().collect();
        order_timeline(&mut selected);
        selected
    }

    async fn delete_where<F>(&self, predicate: F) -> Result<u64, error::SystemError>
    where
        F: Fn(&MessageEntity) -> bool + Send,
    {
        self.check_available()?;
        let mut state = self.state.write().await;
        let before = state.rows.len();
        state.rows.retain(|row| !predicate(row));
        Ok((before - state.rows.len()) as u64)
    }
}

#[async_trait::async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(
        &self,
        message: &ValidatedMessage,
    ) -> Result<MessageEntity, error::SystemError> {
        self.check_available()?;
        let mut state = self.state.write().await;

        let now = self.frozen_clock.unwrap_or_else(Utc::now);
        let sent_at = match state.last_sent_at {
            Some(last) if last > now => last,
            _ => now,
        };
        state.next_seq += 1;
        state.last_sent_at = Some(sent_at);

        let entity = MessageEntity {
            seq: state.next_seq,
            sender_id: message.sender_id(),
            receiver_id: message.receiver_id(),
            message_text: message.text().to_string(),
            sent_at,
        };
        state.rows.push(entity.clone());
        Ok(entity)
    }

    async fn find_by_receiver(
        &self,
        receiver_id: i32,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(Self::select(&state.rows, |row| row.receiver_id == receiver_id))
    }

    async fn find_conversation(
        &self,
        pair: &ParticipantPair,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(Self::select(&state.rows, |row| between(pair, row)))
    }

    async fn delete_conversation(&self, pair: &ParticipantPair) -> Result<u64, error::SystemError> {
        let pair = *pair;
        self.delete_where(move |row| between(&pair, row)).await
    }

    async fn delete_by_user(&self, user_id: i32) -> Result<u64, error::SystemError> {
        self.delete_where(move |row| row.sender_id == user_id || row.receiver_id == user_id)
            .await
    }
}

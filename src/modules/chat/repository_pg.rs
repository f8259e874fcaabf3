use crate::{
    api::error,
    modules::chat::{
        conversation::ParticipantPair, model::ValidatedMessage, repository::MessageRepository,
        schema::MessageEntity,
    },
};

#[derive(Clone)]
pub struct MessageRepositoryPg {
    pool: sqlx::PgPool,
}

impl MessageRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageRepositoryPg {
    async fn create(
        &self,
        message: &ValidatedMessage,
    ) -> Result<MessageEntity, error::SystemError> {
        // sent_at comes from the server clock via the column default
        let message = sqlx::query_as::<_, MessageEntity>(
            r#"
            INSERT INTO chat_messages (sender_id, receiver_id, message_text)
            VALUES ($1, $2, $3)
            RETURNING seq, sender_id, receiver_id, message_text, sent_at
            "#,
        )
        .bind(message.sender_id())
        .bind(message.receiver_id())
        .bind(message.text())
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn find_by_receiver(
        &self,
        receiver_id: i32,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        // has index on (receiver_id, sent_at, seq)
        let messages = sqlx::query_as::<_, MessageEntity>(
            r#"
            SELECT seq, sender_id, receiver_id, message_text, sent_at
            FROM chat_messages
            WHERE receiver_id = $1
            ORDER BY sent_at ASC, seq ASC
            "#,
        )
        .bind(receiver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn find_conversation(
        &self,
        pair: &ParticipantPair,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let messages = sqlx::query_as::<_, MessageEntity>(
            r#"
            SELECT seq, sender_id, receiver_id, message_text, sent_at
            FROM chat_messages
            WHERE
                (sender_id = $1 AND receiver_id = $2)
             OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY sent_at ASC, seq ASC
            "#,
        )
        .bind(pair.low())
        .bind(pair.high())
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn delete_conversation(&self, pair: &ParticipantPair) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            r#"
            DELETE FROM chat_messages
            WHERE
                (sender_id = $1 AND receiver_id = $2)
             OR (sender_id = $2 AND receiver_id = $1)
            "#,
        )
        .bind(pair.low())
        .bind(pair.high())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }

    async fn delete_by_user(&self, user_id: i32) -> Result<u64, error::SystemError> {
        let rows =
            sqlx::query("DELETE FROM chat_messages WHERE sender_id = $1 OR receiver_id = $1")
                .bind(user_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    //! These run against a live PostgreSQL instance (`DATABASE_URL`); each test
    //! gets a fresh database with the migrations applied.

    use super::*;
    use crate::modules::chat::model::{validate, NewMessage};

    async fn insert(repo: &MessageRepositoryPg, sender_id: i32, receiver_id: i32, text: &str) {
        let message = validate(Some(&NewMessage::new(sender_id, receiver_id, text))).unwrap();
        repo.create(&message).await.unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_assigns_server_timestamp(pool: sqlx::PgPool) {
        let repo = MessageRepositoryPg::new(pool);
        let before = chrono::Utc::now() - chrono::Duration::minutes(1);

        let message = validate(Some(&NewMessage::new(1, 2, "hi"))).unwrap();
        let stored = repo.create(&message).await.unwrap();

        assert_eq!(stored.sender_id, 1);
        assert_eq!(stored.receiver_id, 2);
        assert_eq!(stored.message_text, "hi");
        assert!(stored.sent_at > before);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_conversation_query_shape(pool: sqlx::PgPool) {
        let repo = MessageRepositoryPg::new(pool);
        insert(&repo, 1, 2, "hi").await;
        insert(&repo, 2, 1, "hello").await;
        insert(&repo, 1, 3, "unrelated").await;

        let pair = ParticipantPair::new(2, 1).unwrap();
        let texts: Vec<String> = repo
            .find_conversation(&pair)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.message_text)
            .collect();
        assert_eq!(texts, vec!["hi", "hello"]);

        let received = repo.find_by_receiver(1).await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message_text, "hello");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_deletes_report_row_counts(pool: sqlx::PgPool) {
        let repo = MessageRepositoryPg::new(pool);
        insert(&repo, 1, 2, "hi").await;
        insert(&repo, 2, 1, "hello").await;
        insert(&repo, 1, 3, "unrelated").await;
        insert(&repo, 4, 5, "elsewhere").await;

        let pair = ParticipantPair::new(1, 2).unwrap();
        assert_eq!(repo.delete_conversation(&pair).await.unwrap(), 2);
        assert_eq!(repo.delete_conversation(&pair).await.unwrap(), 0);
        assert_eq!(repo.delete_by_user(1).await.unwrap(), 1);
        assert_eq!(repo.delete_by_user(4).await.unwrap(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_check_constraint_rejects_self_message(pool: sqlx::PgPool) {
        let result = sqlx::query(
            "INSERT INTO chat_messages (sender_id, receiver_id, message_text) VALUES (5, 5, 'x')",
        )
        .execute(&pool)
        .await;

        let err = error::SystemError::from(result.unwrap_err());
        assert!(matches!(err, error::SystemError::Persistence(_)));
    }
}

//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use teamchat_core::entities::Message;
use teamchat_core::traits::{MessageRepository, RepoResult};

use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, room_id, author_id, content, read, read_at, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self, message))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, room_id, author_id, content, read, read_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.id)
        .bind(message.room_id)
        .bind(message.author_id)
        .bind(&message.content)
        .bind(message.read)
        .bind(message.read_at)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_read_batch(
        &self,
        room_id: Uuid,
        reader_id: Uuid,
        limit: i64,
        read_at: DateTime<Utc>,
    ) -> RepoResult<u64> {
        // One batched update over a LIMITed subselect. The outer
        // `read = FALSE` guard means each execution only flips rows still
        // unread as of its own read, so concurrent invocations for the same
        // (room, reader) are safe and a re-run with nothing new returns 0.
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET read = TRUE, read_at = $4
            WHERE id IN (
                SELECT id FROM messages
                WHERE room_id = $1 AND author_id <> $2 AND read = FALSE
                ORDER BY created_at
                LIMIT $3
            )
            AND read = FALSE
            "#,
        )
        .bind(room_id)
        .bind(reader_id)
        .bind(limit)
        .bind(read_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, room_id: Uuid, reader_id: Uuid) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE room_id = $1 AND author_id <> $2 AND read = FALSE
            "#,
        )
        .bind(room_id)
        .bind(reader_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn last_message(&self, room_id: Uuid) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, room_id, author_id, content, read, read_at, created_at
            FROM messages
            WHERE room_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn count_by_room(&self, room_id: Uuid) -> RepoResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE room_id = $1")
                .bind(room_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(count)
    }
}

//! PostgreSQL implementation of RoomRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use teamchat_core::entities::{direct_pair_key, ChatRoom};
use teamchat_core::traits::{RepoResult, RoomRepository};
use teamchat_core::DomainError;

use crate::models::ChatRoomModel;

use super::error::{map_db_error, room_not_found};

/// PostgreSQL implementation of RoomRepository
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Create a new PgRoomRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ChatRoom>> {
        let result = sqlx::query_as::<_, ChatRoomModel>(
            r#"
            SELECT id, name, is_direct, direct_key, created_at, updated_at
            FROM chat_rooms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChatRoom::from))
    }

    #[instrument(skip(self, room))]
    async fn create(&self, room: &ChatRoom) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_rooms (id, name, is_direct, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(room.id)
        .bind(&room.name)
        .bind(room.is_direct)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, room))]
    async fn update(&self, room: &ChatRoom) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE chat_rooms
            SET name = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(room.id)
        .bind(&room.name)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(room_not_found(room.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        // Memberships, messages, and attachments cascade via foreign keys
        let result = sqlx::query("DELETE FROM chat_rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(room_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_or_create_direct(
        &self,
        new_id: Uuid,
        user_a: Uuid,
        user_b: Uuid,
    ) -> RepoResult<ChatRoom> {
        let key = direct_pair_key(user_a, user_b);

        // Conflict-tolerant insert against the unique direct_key index:
        // two racing callers both reach the re-select and converge on
        // whichever row won the insert.
        sqlx::query(
            r#"
            INSERT INTO chat_rooms (id, name, is_direct, direct_key, created_at, updated_at)
            VALUES ($1, NULL, TRUE, $2, NOW(), NOW())
            ON CONFLICT (direct_key) DO NOTHING
            "#,
        )
        .bind(new_id)
        .bind(&key)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ChatRoomModel>(
            r#"
            SELECT id, name, is_direct, direct_key, created_at, updated_at
            FROM chat_rooms
            WHERE direct_key = $1
            "#,
        )
        .bind(&key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| DomainError::InternalError("direct room vanished after insert".into()))?;

        Ok(ChatRoom::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRoomRepository>();
    }
}

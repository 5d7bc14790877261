//! PostgreSQL implementation of MembershipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use teamchat_core::entities::RoomMember;
use teamchat_core::traits::{MembershipRepository, RepoResult};
use teamchat_core::DomainError;

use crate::models::RoomMemberModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of MembershipRepository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    /// Create a new PgMembershipRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn find(&self, room_id: Uuid, user_id: Uuid) -> RepoResult<Option<RoomMember>> {
        let result = sqlx::query_as::<_, RoomMemberModel>(
            r#"
            SELECT room_id, user_id, role, joined_at
            FROM room_members
            WHERE room_id = $1 AND user_id = $2
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RoomMember::from))
    }

    #[instrument(skip(self))]
    async fn is_member(&self, room_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM room_members WHERE room_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn find_by_room(&self, room_id: Uuid) -> RepoResult<Vec<RoomMember>> {
        let results = sqlx::query_as::<_, RoomMemberModel>(
            r#"
            SELECT room_id, user_id, role, joined_at
            FROM room_members
            WHERE room_id = $1
            ORDER BY joined_at
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(RoomMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_room(&self, room_id: Uuid) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM room_members WHERE room_id = $1",
        )
        .bind(room_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self, member))]
    async fn create(&self, member: &RoomMember) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO room_members (room_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(member.room_id)
        .bind(member.user_id)
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, room_id: Uuid, user_id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM room_members WHERE room_id = $1 AND user_id = $2")
            .bind(room_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}

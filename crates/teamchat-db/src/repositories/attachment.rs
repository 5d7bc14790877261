//! PostgreSQL implementation of AttachmentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use teamchat_core::entities::Attachment;
use teamchat_core::traits::{AttachmentRepository, RepoResult};

use crate::models::AttachmentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AttachmentRepository
#[derive(Clone)]
pub struct PgAttachmentRepository {
    pool: PgPool,
}

impl PgAttachmentRepository {
    /// Create a new PgAttachmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttachmentRepository for PgAttachmentRepository {
    #[instrument(skip(self, attachment))]
    async fn create(&self, attachment: &Attachment) -> RepoResult<()> {
        // message_id carries a unique index: at most one attachment per message
        sqlx::query(
            r#"
            INSERT INTO attachments
                (id, message_id, filename, content_type, size, storage_key, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(attachment.id)
        .bind(attachment.message_id)
        .bind(&attachment.filename)
        .bind(&attachment.content_type)
        .bind(attachment.size)
        .bind(&attachment.storage_key)
        .bind(attachment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_message(&self, message_id: Uuid) -> RepoResult<Option<Attachment>> {
        let result = sqlx::query_as::<_, AttachmentModel>(
            r#"
            SELECT id, message_id, filename, content_type, size, storage_key, created_at
            FROM attachments
            WHERE message_id = $1
            "#,
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Attachment::from))
    }
}

//! Message and attachment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: Uuid,
    pub room_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MessageModel {
    /// Check if the message has been read
    #[inline]
    pub fn is_read(&self) -> bool {
        self.read
    }
}

/// Database model for the attachments table
#[derive(Debug, Clone, FromRow)]
pub struct AttachmentModel {
    pub id: Uuid,
    pub message_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size: i64,
    pub storage_key: String,
    pub created_at: DateTime<Utc>,
}

impl AttachmentModel {
    /// Check if attachment is an image
    #[inline]
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

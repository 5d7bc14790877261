//! Message entity - a persisted chat message with optional attachment

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Message entity
///
/// Content is stored in sanitized form and is immutable after creation.
/// The read flag only ever transitions false to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub room_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread message
    pub fn new(id: Uuid, room_id: Uuid, author_id: Uuid, content: String) -> Self {
        Self {
            id,
            room_id,
            author_id,
            content,
            read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the message read at the given instant; a no-op if already read
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        if !self.read {
            self.read = true;
            self.read_at = Some(at);
        }
    }

    /// Check if message content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Get a truncated preview of the message (for notifications)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}

/// Single file attachment belonging to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: Uuid,
    pub message_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size: i64,
    /// Opaque reference into the file store
    pub storage_key: String,
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    /// Create a new Attachment
    pub fn new(
        id: Uuid,
        message_id: Uuid,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        size: i64,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            id,
            message_id,
            filename: filename.into(),
            content_type: content_type.into(),
            size,
            storage_key: storage_key.into(),
            created_at: Utc::now(),
        }
    }

    /// Check if attachment is an image
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

//! Chat room database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the chat_rooms table
#[derive(Debug, Clone, FromRow)]
pub struct ChatRoomModel {
    pub id: Uuid,
    pub name: Option<String>,
    pub is_direct: bool,
    /// Order-independent member-pair key; NULL for group rooms.
    /// Carries a unique index so racing direct-room creates converge.
    pub direct_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatRoomModel {
    /// Check if this row is a direct-message room
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.is_direct
    }
}

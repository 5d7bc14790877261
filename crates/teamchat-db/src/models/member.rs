//! Room membership database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the room_members table
#[derive(Debug, Clone, FromRow)]
pub struct RoomMemberModel {
    pub room_id: Uuid,
    pub user_id: Uuid,
    /// Stored as text, constrained to 'member' | 'admin' by the schema
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

//! Room events - the payloads fanned out to room subscribers
//!
//! Delivery is at-most-once and best-effort: a disconnected subscriber
//! misses events until it resubscribes and re-fetches history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All events published on a room stream
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomEvent {
    MessageCreated(MessageCreatedEvent),
    Typing(TypingEvent),
    RoomUpdated(RoomUpdatedEvent),
    RoomDeleted(RoomDeletedEvent),
    MemberAdded(MemberAddedEvent),
    MemberRemoved(MemberRemovedEvent),
}

impl RoomEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessageCreated(_) => "MESSAGE_CREATED",
            Self::Typing(_) => "TYPING",
            Self::RoomUpdated(_) => "ROOM_UPDATED",
            Self::RoomDeleted(_) => "ROOM_DELETED",
            Self::MemberAdded(_) => "MEMBER_ADDED",
            Self::MemberRemoved(_) => "MEMBER_REMOVED",
        }
    }

    /// Get the room this event belongs to
    pub fn room_id(&self) -> Uuid {
        match self {
            Self::MessageCreated(e) => e.message.room_id,
            Self::Typing(e) => e.room_id,
            Self::RoomUpdated(e) => e.room_id,
            Self::RoomDeleted(e) => e.room_id,
            Self::MemberAdded(e) => e.room_id,
            Self::MemberRemoved(e) => e.room_id,
        }
    }
}

/// Serialized message as delivered to subscribers, with the author's
/// display name denormalized in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub id: Uuid,
    pub room_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentPayload>,
    pub created_at: DateTime<Utc>,
}

/// Attachment as delivered to subscribers, with a resolved access URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentPayload {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size: i64,
    /// Signed, time-limited URL into the file store
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreatedEvent {
    pub message: MessagePayload,
    pub timestamp: DateTime<Utc>,
}

impl MessageCreatedEvent {
    pub fn new(message: MessagePayload) -> Self {
        Self {
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Ephemeral typing indicator; never persisted, last-write-wins at the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingEvent {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub timestamp: DateTime<Utc>,
}

impl TypingEvent {
    pub fn new(room_id: Uuid, user_id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            room_id,
            user_id,
            display_name: display_name.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUpdatedEvent {
    pub room_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDeletedEvent {
    pub room_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberAddedEvent {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRemovedEvent {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl RoomUpdatedEvent {
    pub fn new(room_id: Uuid) -> Self {
        Self {
            room_id,
            timestamp: Utc::now(),
        }
    }
}

impl RoomDeletedEvent {
    pub fn new(room_id: Uuid) -> Self {
        Self {
            room_id,
            timestamp: Utc::now(),
        }
    }
}

impl MemberAddedEvent {
    pub fn new(room_id: Uuid, user_id: Uuid) -> Self {
        Self {
            room_id,
            user_id,
            timestamp: Utc::now(),
        }
    }
}

impl MemberRemovedEvent {
    pub fn new(room_id: Uuid, user_id: Uuid) -> Self {
        Self {
            room_id,
            user_id,
            timestamp: Utc::now(),
        }
    }
}

//! Response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use teamchat_core::entities::ChatRoom;
use teamchat_core::events::{AttachmentPayload, MessagePayload};

/// A sent message as returned to the caller, with the author's display
/// name denormalized in
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub room_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<MessagePayload> for MessageResponse {
    fn from(payload: MessagePayload) -> Self {
        Self {
            id: payload.id,
            room_id: payload.room_id,
            author_id: payload.author_id,
            author_name: payload.author_name,
            content: payload.content,
            attachment: payload.attachment.map(AttachmentResponse::from),
            created_at: payload.created_at,
        }
    }
}

/// Attachment metadata with a signed, time-limited access URL
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentResponse {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size: i64,
    pub url: String,
}

impl From<AttachmentPayload> for AttachmentResponse {
    fn from(payload: AttachmentPayload) -> Self {
        Self {
            id: payload.id,
            filename: payload.filename,
            content_type: payload.content_type,
            size: payload.size,
            url: payload.url,
        }
    }
}

/// Room summary
#[derive(Debug, Clone, Serialize)]
pub struct RoomResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_direct: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatRoom> for RoomResponse {
    fn from(room: &ChatRoom) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
            is_direct: room.is_direct,
            created_at: room.created_at,
        }
    }
}

//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{Attachment, ChatRoom, Message, RoomMember, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Room Repository
// ============================================================================

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find room by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ChatRoom>>;

    /// Create a new room
    async fn create(&self, room: &ChatRoom) -> RepoResult<()>;

    /// Update an existing room
    async fn update(&self, room: &ChatRoom) -> RepoResult<()>;

    /// Delete a room, cascading to memberships, messages, and attachments
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// Find the direct-message room for a user pair, creating it atomically
    /// if absent. `new_id` is used only when a room has to be created; two
    /// racing callers converge on a single room.
    async fn find_or_create_direct(
        &self,
        new_id: Uuid,
        user_a: Uuid,
        user_b: Uuid,
    ) -> RepoResult<ChatRoom>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find a membership by room and user
    async fn find(&self, room_id: Uuid, user_id: Uuid) -> RepoResult<Option<RoomMember>>;

    /// Check if user belongs to the room
    async fn is_member(&self, room_id: Uuid, user_id: Uuid) -> RepoResult<bool>;

    /// List all memberships of a room
    async fn find_by_room(&self, room_id: Uuid) -> RepoResult<Vec<RoomMember>>;

    /// Count members of a room
    async fn count_by_room(&self, room_id: Uuid) -> RepoResult<i64>;

    /// Add a member to a room
    async fn create(&self, member: &RoomMember) -> RepoResult<()>;

    /// Remove a member from a room
    async fn delete(&self, room_id: Uuid, user_id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>>;

    /// Persist a new message (append-only)
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Mark up to `limit` unread messages in the room, authored by someone
    /// other than `reader_id`, as read at `read_at`. One batched update;
    /// only rows still unread as of its own read are touched. Returns the
    /// number of rows updated, so a re-run with nothing new returns 0.
    async fn mark_read_batch(
        &self,
        room_id: Uuid,
        reader_id: Uuid,
        limit: i64,
        read_at: DateTime<Utc>,
    ) -> RepoResult<u64>;

    /// Count unread messages in the room not authored by `reader_id`
    async fn count_unread(&self, room_id: Uuid, reader_id: Uuid) -> RepoResult<i64>;

    /// Most recent message in the room, if any
    async fn last_message(&self, room_id: Uuid) -> RepoResult<Option<Message>>;

    /// Total number of messages in the room
    async fn count_by_room(&self, room_id: Uuid) -> RepoResult<i64>;
}

// ============================================================================
// Attachment Repository
// ============================================================================

#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Persist an attachment row (at most one per message)
    async fn create(&self, attachment: &Attachment) -> RepoResult<()>;

    /// Find the attachment for a message, if any
    async fn find_by_message(&self, message_id: Uuid) -> RepoResult<Option<Attachment>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;
}

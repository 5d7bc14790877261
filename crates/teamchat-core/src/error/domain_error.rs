//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Room not found: {0}")]
    RoomNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Message not found: {0}")]
    MessageNotFound(Uuid),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    // Intentionally carries no room detail; non-members learn nothing about
    // whether the room exists.
    #[error("Not a member of this room")]
    NotRoomMember,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Message requires content or an attachment")]
    EmptyMessage,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Attachment too large: max {max_bytes} bytes")]
    AttachmentTooLarge { max_bytes: i64 },

    #[error("Unsupported attachment type: {0}")]
    UnsupportedAttachmentType(String),

    #[error("Filename too long: max {max} characters")]
    FilenameTooLong { max: usize },

    #[error("Filename is not allowed: {0}")]
    BlockedFilename(String),

    #[error("Group rooms require a name")]
    RoomNameRequired,

    #[error("Cannot open a direct message with yourself")]
    DirectMessageSelf,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already a member of this room")]
    AlreadyMember,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::RoomNotFound(_) => "UNKNOWN_ROOM",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",

            Self::NotRoomMember => "NOT_ROOM_MEMBER",

            Self::EmptyMessage => "EMPTY_MESSAGE",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::AttachmentTooLarge { .. } => "ATTACHMENT_TOO_LARGE",
            Self::UnsupportedAttachmentType(_) => "UNSUPPORTED_ATTACHMENT_TYPE",
            Self::FilenameTooLong { .. } => "FILENAME_TOO_LONG",
            Self::BlockedFilename(_) => "BLOCKED_FILENAME",
            Self::RoomNameRequired => "ROOM_NAME_REQUIRED",
            Self::DirectMessageSelf => "DIRECT_MESSAGE_SELF",

            Self::AlreadyMember => "ALREADY_MEMBER",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::TransportError(_) => "TRANSPORT_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound(_) | Self::UserNotFound(_) | Self::MessageNotFound(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotRoomMember)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyMessage
                | Self::ContentTooLong { .. }
                | Self::AttachmentTooLarge { .. }
                | Self::UnsupportedAttachmentType(_)
                | Self::FilenameTooLong { .. }
                | Self::BlockedFilename(_)
                | Self::RoomNameRequired
                | Self::DirectMessageSelf
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyMember)
    }

    /// Check if a background task hitting this error should retry.
    ///
    /// Only transient infrastructure failures retry; not-found, validation,
    /// and authorization failures are permanent.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_)
                | Self::CacheError(_)
                | Self::StorageError(_)
                | Self::TransportError(_)
        )
    }
}

//! # teamchat-core
//!
//! Domain layer containing entities, value objects, repository traits, and room events.
//! This crate has zero dependencies on infrastructure (database, cache, transport).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{direct_pair_key, Attachment, ChatRoom, MemberRole, Message, RoomMember, User};
pub use error::DomainError;
pub use events::{
    AttachmentPayload, MemberAddedEvent, MemberRemovedEvent, MessageCreatedEvent, MessagePayload,
    RoomDeletedEvent, RoomEvent, RoomUpdatedEvent, TypingEvent,
};
pub use traits::{
    AttachmentRepository, MembershipRepository, MessageRepository, RepoResult, RoomRepository,
    UserRepository,
};
pub use value_objects::{
    sanitize_inline_html, AttachmentUpload, ALLOWED_CONTENT_TYPES, ALLOWED_INLINE_TAGS,
    BLOCKED_EXTENSIONS, MAX_ATTACHMENT_BYTES, MAX_FILENAME_CHARS, MAX_MESSAGE_CHARS,
};

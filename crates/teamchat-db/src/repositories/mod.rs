//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! teamchat-core. Each repository handles database operations for a
//! specific domain entity.

mod attachment;
mod error;
mod member;
mod message;
mod room;
mod user;

pub use attachment::PgAttachmentRepository;
pub use member::PgMembershipRepository;
pub use message::PgMessageRepository;
pub use room::PgRoomRepository;
pub use user::PgUserRepository;

//! Database models - SQLx-compatible structs for PostgreSQL tables

mod member;
mod message;
mod room;
mod user;

pub use member::RoomMemberModel;
pub use message::{AttachmentModel, MessageModel};
pub use room::ChatRoomModel;
pub use user::UserModel;

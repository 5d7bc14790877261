//! Domain entities

mod member;
mod message;
mod room;
mod user;

pub use member::{MemberRole, RoomMember};
pub use message::{Attachment, Message};
pub use room::{direct_pair_key, ChatRoom};
pub use user::User;

//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AttachmentRepository, MembershipRepository, MessageRepository, RepoResult, RoomRepository,
    UserRepository,
};

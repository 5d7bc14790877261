//! Service implementations

mod context;
mod error;
mod guard;
mod message;
mod read_state;
mod room;
mod subscription;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use guard::MembershipGuard;
pub use message::MessageService;
pub use read_state::ReadStateTracker;
pub use room::RoomService;
pub use subscription::SubscriptionService;

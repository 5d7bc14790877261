//! Room event pub/sub
//!
//! One stream per room, named `chat_room_<room-id>`. Delivery is
//! at-most-once with no replay: a dropped subscriber misses events until it
//! resubscribes and re-fetches history elsewhere.

mod bus;
mod memory;
mod publisher;
mod stream;
mod subscriber;

pub use bus::{BusError, BusResult, EventBus};
pub use memory::InProcessEventBus;
pub use publisher::RedisEventBus;
pub use stream::{RoomStream, ROOM_STREAM_PREFIX};
pub use subscriber::{RoomSubscriber, SubscriberConfig};

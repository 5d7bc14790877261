//! # teamchat-cache
//!
//! Redis caching layer for room view caching and pub/sub event fan-out.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **View Cache**: Short-TTL read-through views keyed by room, with
//!   prefix-based bulk invalidation
//! - **Pub/Sub**: Room event streams (`chat_room_<room-id>`) with Redis and
//!   in-process implementations

pub mod pool;
pub mod pubsub;
pub mod views;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export view cache types
pub use views::{
    CacheError, CacheResult, LastMessageSnapshot, MemberSnapshot, MemoryViewCache, RedisViewCache,
    RoomStats, RoomViewStore, ViewCache,
};

// Re-export pubsub types
pub use pubsub::{
    BusError, BusResult, EventBus, InProcessEventBus, RedisEventBus, RoomStream,
    SubscriberConfig, ROOM_STREAM_PREFIX,
};

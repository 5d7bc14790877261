//! Cached room views
//!
//! Read-through, short-TTL projections of room state, keyed by room so a
//! room mutation can invalidate every derived view in one prefix delete.

mod room_views;
mod view_cache;

pub use room_views::{LastMessageSnapshot, MemberSnapshot, RoomStats, RoomViewStore};
pub use view_cache::{CacheError, CacheResult, MemoryViewCache, RedisViewCache, ViewCache};

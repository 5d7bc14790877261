//! Typed room-view store over the view cache
//!
//! Owns the key scheme and TTL table for the derived room views. Every key
//! is scoped under `room:<room-id>:` so `invalidate_room` can clear all of
//! a room's views in one prefix delete, regardless of user-specific
//! suffixes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use teamchat_core::entities::{MemberRole, Message, RoomMember};

use super::view_cache::{CacheResult, ViewCache};

/// Accessibility and unread-count TTL
pub const ACCESS_TTL: Duration = Duration::from_secs(30);
/// Unread-count TTL
pub const UNREAD_TTL: Duration = Duration::from_secs(30);
/// Online-estimate TTL
pub const ONLINE_TTL: Duration = Duration::from_secs(30);
/// Last-message snapshot TTL
pub const LAST_MESSAGE_TTL: Duration = Duration::from_secs(60);
/// Member-list snapshot TTL
pub const MEMBERS_TTL: Duration = Duration::from_secs(300);
/// Room-stats TTL
pub const STATS_TTL: Duration = Duration::from_secs(600);

/// Column-projected member row as cached in the member-list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub user_id: Uuid,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl From<&RoomMember> for MemberSnapshot {
    fn from(member: &RoomMember) -> Self {
        Self {
            user_id: member.user_id,
            role: member.role,
            joined_at: member.joined_at,
        }
    }
}

/// Most recent message as cached in the last-message view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMessageSnapshot {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for LastMessageSnapshot {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            author_id: message.author_id,
            content: message.content.clone(),
            created_at: message.created_at,
        }
    }
}

/// Aggregate room statistics view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStats {
    pub message_count: i64,
    pub member_count: i64,
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// Typed read-side helpers over the view cache
#[derive(Clone)]
pub struct RoomViewStore {
    cache: Arc<dyn ViewCache>,
}

impl RoomViewStore {
    /// Create a new store over a cache implementation
    #[must_use]
    pub fn new(cache: Arc<dyn ViewCache>) -> Self {
        Self { cache }
    }

    /// The key prefix every view of a room shares
    #[must_use]
    pub fn room_prefix(room_id: Uuid) -> String {
        format!("room:{room_id}:")
    }

    fn access_key(room_id: Uuid, user_id: Uuid) -> String {
        format!("room:{room_id}:access:{user_id}")
    }

    fn unread_key(room_id: Uuid, user_id: Uuid) -> String {
        format!("room:{room_id}:unread:{user_id}")
    }

    fn online_key(room_id: Uuid) -> String {
        format!("room:{room_id}:online")
    }

    fn last_message_key(room_id: Uuid) -> String {
        format!("room:{room_id}:last_message")
    }

    fn members_key(room_id: Uuid) -> String {
        format!("room:{room_id}:members")
    }

    fn stats_key(room_id: Uuid) -> String {
        format!("room:{room_id}:stats")
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        match self.cache.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn put_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> CacheResult<()> {
        let raw = serde_json::to_string(value)?;
        self.cache.put(key, &raw, ttl).await
    }

    // === Accessibility ===

    /// Cached membership check, None on miss
    pub async fn get_access(&self, room_id: Uuid, user_id: Uuid) -> CacheResult<Option<bool>> {
        self.get_json(&Self::access_key(room_id, user_id)).await
    }

    /// Store a membership check result
    pub async fn put_access(&self, room_id: Uuid, user_id: Uuid, allowed: bool) -> CacheResult<()> {
        self.put_json(&Self::access_key(room_id, user_id), &allowed, ACCESS_TTL)
            .await
    }

    // === Unread count ===

    /// Cached unread count, None on miss
    pub async fn get_unread(&self, room_id: Uuid, user_id: Uuid) -> CacheResult<Option<i64>> {
        self.get_json(&Self::unread_key(room_id, user_id)).await
    }

    /// Store an unread count
    pub async fn put_unread(&self, room_id: Uuid, user_id: Uuid, count: i64) -> CacheResult<()> {
        self.put_json(&Self::unread_key(room_id, user_id), &count, UNREAD_TTL)
            .await
    }

    // === Online estimate ===

    /// Cached online estimate, None on miss
    pub async fn get_online(&self, room_id: Uuid) -> CacheResult<Option<i64>> {
        self.get_json(&Self::online_key(room_id)).await
    }

    /// Store an online estimate
    pub async fn put_online(&self, room_id: Uuid, count: i64) -> CacheResult<()> {
        self.put_json(&Self::online_key(room_id), &count, ONLINE_TTL)
            .await
    }

    // === Last message ===

    /// Cached last-message snapshot. The outer `None` is a cache miss; the
    /// cached value itself is `None` for a room with no messages yet.
    pub async fn get_last_message(
        &self,
        room_id: Uuid,
    ) -> CacheResult<Option<Option<LastMessageSnapshot>>> {
        self.get_json(&Self::last_message_key(room_id)).await
    }

    /// Store a last-message snapshot (or the absence of one)
    pub async fn put_last_message(
        &self,
        room_id: Uuid,
        snapshot: &Option<LastMessageSnapshot>,
    ) -> CacheResult<()> {
        self.put_json(&Self::last_message_key(room_id), snapshot, LAST_MESSAGE_TTL)
            .await
    }

    // === Member list ===

    /// Cached member-list snapshot, None on miss
    pub async fn get_members(&self, room_id: Uuid) -> CacheResult<Option<Vec<MemberSnapshot>>> {
        self.get_json(&Self::members_key(room_id)).await
    }

    /// Store a member-list snapshot
    pub async fn put_members(
        &self,
        room_id: Uuid,
        members: &[MemberSnapshot],
    ) -> CacheResult<()> {
        self.put_json(&Self::members_key(room_id), &members, MEMBERS_TTL)
            .await
    }

    // === Stats ===

    /// Cached stats aggregate, None on miss
    pub async fn get_stats(&self, room_id: Uuid) -> CacheResult<Option<RoomStats>> {
        self.get_json(&Self::stats_key(room_id)).await
    }

    /// Store a stats aggregate
    pub async fn put_stats(&self, room_id: Uuid, stats: &RoomStats) -> CacheResult<()> {
        self.put_json(&Self::stats_key(room_id), stats, STATS_TTL).await
    }

    // === Invalidation ===

    /// Drop every cached view of the room, whatever user suffix it carries
    pub async fn invalidate_room(&self, room_id: Uuid) -> CacheResult<u64> {
        self.cache.delete_prefix(&Self::room_prefix(room_id)).await
    }

    /// Drop one reader's unread-count entry
    pub async fn invalidate_unread(&self, room_id: Uuid, user_id: Uuid) -> CacheResult<()> {
        self.cache.delete(&Self::unread_key(room_id, user_id)).await
    }
}

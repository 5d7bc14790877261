//! In-memory implementations of the repository and file-store ports
//!
//! One shared `MemoryStore` backs all repositories so cascades behave like
//! the real schema: deleting a room takes its memberships, messages, and
//! attachments with it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use teamchat_common::{AppResult, FileStore};
use teamchat_core::entities::{direct_pair_key, Attachment, ChatRoom, Message, RoomMember, User};
use teamchat_core::traits::{
    AttachmentRepository, MembershipRepository, MessageRepository, RepoResult, RoomRepository,
    UserRepository,
};
use teamchat_core::DomainError;

/// Shared backing state for the in-memory repositories
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    users: HashMap<Uuid, User>,
    rooms: HashMap<Uuid, ChatRoom>,
    direct_keys: HashMap<String, Uuid>,
    members: HashMap<(Uuid, Uuid), RoomMember>,
    messages: HashMap<Uuid, Message>,
    /// Keyed by message id; at most one attachment per message
    attachments: HashMap<Uuid, Attachment>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Direct read access for assertions
    pub fn message(&self, id: Uuid) -> Option<Message> {
        self.inner.read().messages.get(&id).cloned()
    }

    /// Total persisted messages across all rooms
    pub fn message_count(&self) -> usize {
        self.inner.read().messages.len()
    }
}

// ============================================================================
// Rooms
// ============================================================================

#[derive(Clone)]
pub struct MemoryRoomRepository {
    store: Arc<MemoryStore>,
}

impl MemoryRoomRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoomRepository for MemoryRoomRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ChatRoom>> {
        Ok(self.store.inner.read().rooms.get(&id).cloned())
    }

    async fn create(&self, room: &ChatRoom) -> RepoResult<()> {
        self.store.inner.write().rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn update(&self, room: &ChatRoom) -> RepoResult<()> {
        let mut inner = self.store.inner.write();
        if !inner.rooms.contains_key(&room.id) {
            return Err(DomainError::RoomNotFound(room.id));
        }
        inner.rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut inner = self.store.inner.write();
        if inner.rooms.remove(&id).is_none() {
            return Err(DomainError::RoomNotFound(id));
        }

        // Cascade like the schema's foreign keys
        inner.direct_keys.retain(|_, room_id| *room_id != id);
        inner.members.retain(|(room_id, _), _| *room_id != id);
        let doomed: Vec<Uuid> = inner
            .messages
            .values()
            .filter(|m| m.room_id == id)
            .map(|m| m.id)
            .collect();
        for message_id in doomed {
            inner.messages.remove(&message_id);
            inner.attachments.remove(&message_id);
        }
        Ok(())
    }

    async fn find_or_create_direct(
        &self,
        new_id: Uuid,
        user_a: Uuid,
        user_b: Uuid,
    ) -> RepoResult<ChatRoom> {
        let key = direct_pair_key(user_a, user_b);
        let mut inner = self.store.inner.write();

        if let Some(room_id) = inner.direct_keys.get(&key) {
            let room = inner
                .rooms
                .get(room_id)
                .cloned()
                .ok_or_else(|| DomainError::InternalError("dangling direct key".into()))?;
            return Ok(room);
        }

        let room = ChatRoom::new_direct(new_id);
        inner.direct_keys.insert(key, room.id);
        inner.rooms.insert(room.id, room.clone());
        Ok(room)
    }
}

// ============================================================================
// Memberships
// ============================================================================

#[derive(Clone)]
pub struct MemoryMembershipRepository {
    store: Arc<MemoryStore>,
}

impl MemoryMembershipRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MembershipRepository for MemoryMembershipRepository {
    async fn find(&self, room_id: Uuid, user_id: Uuid) -> RepoResult<Option<RoomMember>> {
        Ok(self
            .store
            .inner
            .read()
            .members
            .get(&(room_id, user_id))
            .cloned())
    }

    async fn is_member(&self, room_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        Ok(self
            .store
            .inner
            .read()
            .members
            .contains_key(&(room_id, user_id)))
    }

    async fn find_by_room(&self, room_id: Uuid) -> RepoResult<Vec<RoomMember>> {
        let mut members: Vec<RoomMember> = self
            .store
            .inner
            .read()
            .members
            .values()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect();
        members.sort_by_key(|m| m.joined_at);
        Ok(members)
    }

    async fn count_by_room(&self, room_id: Uuid) -> RepoResult<i64> {
        Ok(self
            .store
            .inner
            .read()
            .members
            .values()
            .filter(|m| m.room_id == room_id)
            .count() as i64)
    }

    async fn create(&self, member: &RoomMember) -> RepoResult<()> {
        let mut inner = self.store.inner.write();
        let key = (member.room_id, member.user_id);
        if inner.members.contains_key(&key) {
            return Err(DomainError::AlreadyMember);
        }
        inner.members.insert(key, member.clone());
        Ok(())
    }

    async fn delete(&self, room_id: Uuid, user_id: Uuid) -> RepoResult<()> {
        self.store.inner.write().members.remove(&(room_id, user_id));
        Ok(())
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Clone)]
pub struct MemoryMessageRepository {
    store: Arc<MemoryStore>,
}

impl MemoryMessageRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageRepository for MemoryMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>> {
        Ok(self.store.inner.read().messages.get(&id).cloned())
    }

    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.store
            .inner
            .write()
            .messages
            .insert(message.id, message.clone());
        Ok(())
    }

    async fn mark_read_batch(
        &self,
        room_id: Uuid,
        reader_id: Uuid,
        limit: i64,
        read_at: DateTime<Utc>,
    ) -> RepoResult<u64> {
        let mut inner = self.store.inner.write();

        let mut unread: Vec<(DateTime<Utc>, Uuid)> = inner
            .messages
            .values()
            .filter(|m| m.room_id == room_id && m.author_id != reader_id && !m.read)
            .map(|m| (m.created_at, m.id))
            .collect();
        unread.sort();
        unread.truncate(limit.max(0) as usize);

        for (_, id) in &unread {
            if let Some(message) = inner.messages.get_mut(id) {
                message.mark_read(read_at);
            }
        }

        Ok(unread.len() as u64)
    }

    async fn count_unread(&self, room_id: Uuid, reader_id: Uuid) -> RepoResult<i64> {
        Ok(self
            .store
            .inner
            .read()
            .messages
            .values()
            .filter(|m| m.room_id == room_id && m.author_id != reader_id && !m.read)
            .count() as i64)
    }

    async fn last_message(&self, room_id: Uuid) -> RepoResult<Option<Message>> {
        Ok(self
            .store
            .inner
            .read()
            .messages
            .values()
            .filter(|m| m.room_id == room_id)
            .max_by_key(|m| m.created_at)
            .cloned())
    }

    async fn count_by_room(&self, room_id: Uuid) -> RepoResult<i64> {
        Ok(self
            .store
            .inner
            .read()
            .messages
            .values()
            .filter(|m| m.room_id == room_id)
            .count() as i64)
    }
}

// ============================================================================
// Attachments
// ============================================================================

#[derive(Clone)]
pub struct MemoryAttachmentRepository {
    store: Arc<MemoryStore>,
}

impl MemoryAttachmentRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AttachmentRepository for MemoryAttachmentRepository {
    async fn create(&self, attachment: &Attachment) -> RepoResult<()> {
        self.store
            .inner
            .write()
            .attachments
            .insert(attachment.message_id, attachment.clone());
        Ok(())
    }

    async fn find_by_message(&self, message_id: Uuid) -> RepoResult<Option<Attachment>> {
        Ok(self
            .store
            .inner
            .read()
            .attachments
            .get(&message_id)
            .cloned())
    }
}

// ============================================================================
// Users
// ============================================================================

#[derive(Clone)]
pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.store.inner.read().users.get(&id).cloned())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.store.inner.write().users.insert(user.id, user.clone());
        Ok(())
    }
}

// ============================================================================
// File store
// ============================================================================

/// In-memory blob store handing out fake signed URLs
#[derive(Default)]
pub struct MemoryFileStore {
    blobs: RwLock<HashMap<String, usize>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn blob_count(&self) -> usize {
        self.blobs.read().len()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn put(&self, data: &[u8], _filename: &str, _content_type: &str) -> AppResult<String> {
        let storage_key = format!("blobs/{}", Uuid::new_v4());
        self.blobs.write().insert(storage_key.clone(), data.len());
        Ok(storage_key)
    }

    fn signed_url(&self, storage_key: &str, filename: &str) -> AppResult<String> {
        Ok(format!("memory://{storage_key}?file={filename}&sig=test"))
    }
}

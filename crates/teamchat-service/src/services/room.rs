//! Room service
//!
//! Room lifecycle, membership mutation, direct-message rooms, and the
//! read-through cached views. Every room mutation bulk-invalidates the
//! room's cache prefix so no view outlives the state it projected.

use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use teamchat_cache::{LastMessageSnapshot, MemberSnapshot, RoomStats};
use teamchat_core::entities::{ChatRoom, MemberRole, RoomMember};
use teamchat_core::events::{
    MemberAddedEvent, MemberRemovedEvent, RoomDeletedEvent, RoomEvent, RoomUpdatedEvent,
};
use teamchat_core::DomainError;

use crate::dto::{CreateRoomRequest, RoomResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::guard::MembershipGuard;

/// Room service
pub struct RoomService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoomService<'a> {
    /// Create a new RoomService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // === Lifecycle ===

    /// Create a named group room; the creator joins as admin
    #[instrument(skip(self, request))]
    pub async fn create_room(
        &self,
        creator_id: Uuid,
        request: CreateRoomRequest,
    ) -> ServiceResult<RoomResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        self.ctx
            .user_repo()
            .find_by_id(creator_id)
            .await?
            .ok_or(DomainError::UserNotFound(creator_id))?;

        let room = ChatRoom::new_group(Uuid::new_v4(), request.name);
        room.validate()?;
        self.ctx.room_repo().create(&room).await?;

        self.ctx
            .membership_repo()
            .create(&RoomMember::new(room.id, creator_id, MemberRole::Admin))
            .await?;

        info!(room_id = %room.id, creator_id = %creator_id, "Room created");

        Ok(RoomResponse::from(&room))
    }

    /// Open (or find) the direct-message room for a user pair.
    ///
    /// Deterministic and atomic: `(a, b)` and `(b, a)` converge on the same
    /// room even when racing, via the unique pair key at the persistence
    /// layer.
    #[instrument(skip(self))]
    pub async fn open_direct(&self, user_a: Uuid, user_b: Uuid) -> ServiceResult<RoomResponse> {
        if user_a == user_b {
            return Err(DomainError::DirectMessageSelf.into());
        }

        for user_id in [user_a, user_b] {
            self.ctx
                .user_repo()
                .find_by_id(user_id)
                .await?
                .ok_or(DomainError::UserNotFound(user_id))?;
        }

        let room = self
            .ctx
            .room_repo()
            .find_or_create_direct(Uuid::new_v4(), user_a, user_b)
            .await?;

        for user_id in [user_a, user_b] {
            let member = RoomMember::new(room.id, user_id, MemberRole::Member);
            match self.ctx.membership_repo().create(&member).await {
                Ok(()) | Err(DomainError::AlreadyMember) => {}
                Err(e) => return Err(e.into()),
            }
        }

        info!(room_id = %room.id, "Direct room opened");

        Ok(RoomResponse::from(&room))
    }

    /// Rename a room
    #[instrument(skip(self))]
    pub async fn update_room(&self, room_id: Uuid, name: String) -> ServiceResult<RoomResponse> {
        let mut room = self
            .ctx
            .room_repo()
            .find_by_id(room_id)
            .await?
            .ok_or(DomainError::RoomNotFound(room_id))?;

        room.rename(name);
        room.validate()?;
        self.ctx.room_repo().update(&room).await?;

        self.invalidate_views(room_id).await;
        self.publish(RoomEvent::RoomUpdated(RoomUpdatedEvent::new(room_id)))
            .await;

        info!(room_id = %room_id, "Room updated");

        Ok(RoomResponse::from(&room))
    }

    /// Destroy a room, cascading to memberships, messages, and attachments
    #[instrument(skip(self))]
    pub async fn delete_room(&self, room_id: Uuid) -> ServiceResult<()> {
        self.ctx.room_repo().delete(room_id).await?;

        self.invalidate_views(room_id).await;
        self.publish(RoomEvent::RoomDeleted(RoomDeletedEvent::new(room_id)))
            .await;

        info!(room_id = %room_id, "Room deleted");

        Ok(())
    }

    // === Membership ===

    /// Add a user to a room
    #[instrument(skip(self))]
    pub async fn add_member(
        &self,
        room_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> ServiceResult<()> {
        self.ctx
            .room_repo()
            .find_by_id(room_id)
            .await?
            .ok_or(DomainError::RoomNotFound(room_id))?;
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        self.ctx
            .membership_repo()
            .create(&RoomMember::new(room_id, user_id, role))
            .await?;

        self.invalidate_views(room_id).await;
        self.publish(RoomEvent::MemberAdded(MemberAddedEvent::new(
            room_id, user_id,
        )))
        .await;

        info!(room_id = %room_id, user_id = %user_id, role = %role, "Member added");

        Ok(())
    }

    /// Remove a user from a room
    #[instrument(skip(self))]
    pub async fn remove_member(&self, room_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        self.ctx.membership_repo().delete(room_id, user_id).await?;

        self.invalidate_views(room_id).await;
        self.publish(RoomEvent::MemberRemoved(MemberRemovedEvent::new(
            room_id, user_id,
        )))
        .await;

        info!(room_id = %room_id, user_id = %user_id, "Member removed");

        Ok(())
    }

    // === Cached views ===

    /// Member list, cached as a snapshot
    #[instrument(skip(self))]
    pub async fn member_list(
        &self,
        room_id: Uuid,
        requester_id: Uuid,
    ) -> ServiceResult<Vec<MemberSnapshot>> {
        MembershipGuard::new(self.ctx).authorize(room_id, requester_id).await?;

        if let Some(cached) = self.read_view(self.ctx.views().get_members(room_id).await) {
            return Ok(cached);
        }

        let members = self.ctx.membership_repo().find_by_room(room_id).await?;
        let snapshot: Vec<MemberSnapshot> = members.iter().map(MemberSnapshot::from).collect();

        self.write_view(self.ctx.views().put_members(room_id, &snapshot).await);
        Ok(snapshot)
    }

    /// Most recent message, cached; None for a room with no messages yet
    #[instrument(skip(self))]
    pub async fn last_message(
        &self,
        room_id: Uuid,
        requester_id: Uuid,
    ) -> ServiceResult<Option<LastMessageSnapshot>> {
        MembershipGuard::new(self.ctx).authorize(room_id, requester_id).await?;

        if let Some(cached) = self.read_view(self.ctx.views().get_last_message(room_id).await) {
            return Ok(cached);
        }

        let snapshot = self
            .ctx
            .message_repo()
            .last_message(room_id)
            .await?
            .map(|m| LastMessageSnapshot::from(&m));

        self.write_view(self.ctx.views().put_last_message(room_id, &snapshot).await);
        Ok(snapshot)
    }

    /// Unread count for the requester, cached
    #[instrument(skip(self))]
    pub async fn unread_count(&self, room_id: Uuid, requester_id: Uuid) -> ServiceResult<i64> {
        MembershipGuard::new(self.ctx).authorize(room_id, requester_id).await?;

        if let Some(cached) =
            self.read_view(self.ctx.views().get_unread(room_id, requester_id).await)
        {
            return Ok(cached);
        }

        let count = self
            .ctx
            .message_repo()
            .count_unread(room_id, requester_id)
            .await?;

        self.write_view(
            self.ctx
                .views()
                .put_unread(room_id, requester_id, count)
                .await,
        );
        Ok(count)
    }

    /// Aggregate room statistics, cached
    #[instrument(skip(self))]
    pub async fn stats(&self, room_id: Uuid, requester_id: Uuid) -> ServiceResult<RoomStats> {
        MembershipGuard::new(self.ctx).authorize(room_id, requester_id).await?;

        if let Some(cached) = self.read_view(self.ctx.views().get_stats(room_id).await) {
            return Ok(cached);
        }

        let message_count = self.ctx.message_repo().count_by_room(room_id).await?;
        let member_count = self.ctx.membership_repo().count_by_room(room_id).await?;
        let last_activity_at = self
            .ctx
            .message_repo()
            .last_message(room_id)
            .await?
            .map(|m| m.created_at);

        let stats = RoomStats {
            message_count,
            member_count,
            last_activity_at,
        };

        self.write_view(self.ctx.views().put_stats(room_id, &stats).await);
        Ok(stats)
    }

    /// Online-user estimate, cached.
    ///
    /// This is the membership count, not real presence: no presence
    /// protocol exists, so the estimate is the room's total membership.
    #[instrument(skip(self))]
    pub async fn online_count(&self, room_id: Uuid, requester_id: Uuid) -> ServiceResult<i64> {
        MembershipGuard::new(self.ctx).authorize(room_id, requester_id).await?;

        if let Some(cached) = self.read_view(self.ctx.views().get_online(room_id).await) {
            return Ok(cached);
        }

        let count = self.ctx.membership_repo().count_by_room(room_id).await?;

        self.write_view(self.ctx.views().put_online(room_id, count).await);
        Ok(count)
    }

    // === Helpers ===

    /// A cache read failure degrades to recomputation
    fn read_view<T>(&self, result: Result<Option<T>, teamchat_cache::CacheError>) -> Option<T> {
        match result {
            Ok(hit) => hit,
            Err(e) => {
                warn!(error = %e, "View cache read failed, recomputing");
                None
            }
        }
    }

    /// A cache write failure costs only the memoization
    fn write_view(&self, result: Result<(), teamchat_cache::CacheError>) {
        if let Err(e) = result {
            warn!(error = %e, "View cache write failed");
        }
    }

    /// Drop every cached view of the room
    async fn invalidate_views(&self, room_id: Uuid) {
        if let Err(e) = self.ctx.views().invalidate_room(room_id).await {
            warn!(room_id = %room_id, error = %e, "Room view invalidation failed");
        }
    }

    /// Best-effort fan-out: a publish failure is logged, never surfaced
    async fn publish(&self, event: RoomEvent) {
        if let Err(e) = self.ctx.event_bus().publish(&event).await {
            warn!(
                room_id = %event.room_id(),
                event_type = event.event_type(),
                error = %e,
                "Failed to publish room event"
            );
        }
    }
}

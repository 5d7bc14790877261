//! Subscription service
//!
//! Resolves a bearer token to a user and opens a guarded stream
//! subscription. The guard result here only gates the subscription;
//! ingestion re-validates membership on every message.

use tokio::sync::broadcast;
use tracing::instrument;
use uuid::Uuid;

use teamchat_core::events::RoomEvent;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::guard::MembershipGuard;

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new SubscriptionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve a bearer token to the authenticated user
    pub fn authenticate(&self, token: &str) -> ServiceResult<Uuid> {
        Ok(self.ctx.jwt_service().verify_user(token)?)
    }

    /// Subscribe an authorized member to a room's event stream
    #[instrument(skip(self))]
    pub async fn subscribe(
        &self,
        room_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<broadcast::Receiver<RoomEvent>> {
        MembershipGuard::new(self.ctx).authorize(room_id, user_id).await?;
        Ok(self.ctx.event_bus().subscribe(room_id).await?)
    }

    /// Authenticate a token and subscribe in one step
    #[instrument(skip(self, token))]
    pub async fn subscribe_with_token(
        &self,
        room_id: Uuid,
        token: &str,
    ) -> ServiceResult<broadcast::Receiver<RoomEvent>> {
        let user_id = self.authenticate(token)?;
        self.subscribe(room_id, user_id).await
    }
}

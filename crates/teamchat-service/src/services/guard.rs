//! Membership guard
//!
//! Authorizes a (room, user) pair before stream subscription and before
//! every message ingestion. The check is read-through cached for a short
//! TTL; a cache outage degrades to the direct lookup rather than failing
//! the request.

use tracing::{instrument, warn};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Membership guard service
pub struct MembershipGuard<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipGuard<'a> {
    /// Create a new MembershipGuard
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Require that the user may access the room.
    ///
    /// # Errors
    /// Returns `ServiceError::Denied` when the room does not exist or the
    /// user is not a member; the two cases are indistinguishable to the
    /// caller.
    #[instrument(skip(self))]
    pub async fn authorize(&self, room_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        if self.is_accessible(room_id, user_id).await? {
            Ok(())
        } else {
            Err(ServiceError::Denied)
        }
    }

    /// Cached accessibility check
    #[instrument(skip(self))]
    pub async fn is_accessible(&self, room_id: Uuid, user_id: Uuid) -> ServiceResult<bool> {
        match self.ctx.views().get_access(room_id, user_id).await {
            Ok(Some(allowed)) => return Ok(allowed),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Accessibility cache read failed, falling back to lookup");
            }
        }

        let allowed = match self.ctx.room_repo().find_by_id(room_id).await? {
            Some(_) => self.ctx.membership_repo().is_member(room_id, user_id).await?,
            None => false,
        };

        if let Err(e) = self.ctx.views().put_access(room_id, user_id, allowed).await {
            warn!(error = %e, "Accessibility cache write failed");
        }

        Ok(allowed)
    }
}

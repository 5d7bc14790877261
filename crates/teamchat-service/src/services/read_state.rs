//! Read-state tracker
//!
//! Marks messages read for a (room, reader) pair after display, off the
//! render path. The batched update is idempotent and safe to run
//! concurrently for the same pair: each execution only touches rows still
//! unread as of its own read, and a message arriving mid-batch is simply
//! picked up by the next invocation.

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use teamchat_core::DomainError;

use crate::tasks::{RetryPolicy, TaskDispatcher, TaskOutcome};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Upper bound on rows marked per invocation
pub const READ_BATCH_LIMIT: i64 = 100;

/// Read-state tracker service
pub struct ReadStateTracker<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReadStateTracker<'a> {
    /// Create a new ReadStateTracker
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mark up to [`READ_BATCH_LIMIT`] unread messages read and invalidate
    /// the reader's unread-count cache entry. Returns the rows marked; a
    /// re-run with nothing newly unread returns 0.
    ///
    /// # Errors
    /// A vanished room or reader is permanently rejected (non-retryable);
    /// infrastructure failures are retryable by the dispatcher.
    #[instrument(skip(self))]
    pub async fn mark_room_read(&self, room_id: Uuid, reader_id: Uuid) -> ServiceResult<u64> {
        mark_room_read(self.ctx, room_id, reader_id).await
    }

    /// Dispatch [`mark_room_read`](Self::mark_room_read) as a background
    /// task with retry. Failures stay internal; the caller gets a handle
    /// only for tests and shutdown accounting.
    pub fn enqueue(
        &self,
        dispatcher: &TaskDispatcher,
        room_id: Uuid,
        reader_id: Uuid,
    ) -> JoinHandle<TaskOutcome> {
        let ctx = self.ctx.clone();
        dispatcher.spawn("mark_room_read", RetryPolicy::default(), move || {
            let ctx = ctx.clone();
            async move { mark_room_read(&ctx, room_id, reader_id).await }
        })
    }
}

async fn mark_room_read(
    ctx: &ServiceContext,
    room_id: Uuid,
    reader_id: Uuid,
) -> ServiceResult<u64> {
    ctx.room_repo()
        .find_by_id(room_id)
        .await?
        .ok_or(DomainError::RoomNotFound(room_id))?;
    ctx.user_repo()
        .find_by_id(reader_id)
        .await?
        .ok_or(DomainError::UserNotFound(reader_id))?;

    let marked = ctx
        .message_repo()
        .mark_read_batch(room_id, reader_id, READ_BATCH_LIMIT, Utc::now())
        .await?;

    if marked > 0 {
        info!(room_id = %room_id, reader_id = %reader_id, marked, "Marked messages read");
    } else {
        debug!(room_id = %room_id, reader_id = %reader_id, "Nothing newly unread");
    }

    ctx.views().invalidate_unread(room_id, reader_id).await?;

    Ok(marked)
}

//! Redis-backed event bus
//!
//! Publishes serialized room events through the shared connection pool and
//! delegates subscriptions to the reconnecting background subscriber.

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use teamchat_core::events::RoomEvent;

use crate::pool::RedisPool;

use super::bus::{BusError, BusResult, EventBus};
use super::stream::RoomStream;
use super::subscriber::{RoomSubscriber, SubscriberConfig};

/// Redis implementation of the event bus
pub struct RedisEventBus {
    pool: RedisPool,
    subscriber: RoomSubscriber,
}

impl RedisEventBus {
    /// Create a bus over a pool, starting the subscriber task
    #[must_use]
    pub fn new(pool: RedisPool, config: SubscriberConfig) -> Self {
        Self {
            pool,
            subscriber: RoomSubscriber::new(config),
        }
    }

    /// Shut down the subscriber task
    pub async fn shutdown(&self) -> BusResult<()> {
        self.subscriber.shutdown().await
    }
}

#[async_trait]
impl EventBus for RedisEventBus {
    async fn publish(&self, event: &RoomEvent) -> BusResult<()> {
        let stream = RoomStream::new(event.room_id());
        let payload = serde_json::to_string(event)?;

        let receivers = self
            .pool
            .publish(&stream.name(), &payload)
            .await
            .map_err(|e| BusError::Transport(e.to_string()))?;

        tracing::debug!(
            stream = %stream,
            event_type = event.event_type(),
            receivers = receivers,
            "Published room event"
        );

        Ok(())
    }

    async fn subscribe(&self, room_id: Uuid) -> BusResult<broadcast::Receiver<RoomEvent>> {
        self.subscriber.subscribe(room_id).await
    }
}

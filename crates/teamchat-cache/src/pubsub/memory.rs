//! In-process event bus
//!
//! Single-node fan-out over per-room tokio broadcast channels. Also the
//! test double for the Redis bus.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use teamchat_core::events::RoomEvent;

use super::bus::{BusError, BusResult, EventBus};

/// Default per-room broadcast buffer
const DEFAULT_CAPACITY: usize = 256;

/// In-process implementation of the event bus
pub struct InProcessEventBus {
    senders: DashMap<Uuid, broadcast::Sender<RoomEvent>>,
    capacity: usize,
}

impl InProcessEventBus {
    /// Create a bus with the default per-room buffer
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bus with an explicit per-room buffer
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            senders: DashMap::new(),
            capacity,
        }
    }

    fn sender(&self, room_id: Uuid) -> broadcast::Sender<RoomEvent> {
        self.senders
            .entry(room_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}

impl Default for InProcessEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InProcessEventBus {
    async fn publish(&self, event: &RoomEvent) -> BusResult<()> {
        let Some(sender) = self.senders.get(&event.room_id()).map(|s| s.clone()) else {
            // Nobody ever subscribed to this room
            return Ok(());
        };

        if sender.receiver_count() == 0 {
            return Ok(());
        }

        sender
            .send(event.clone())
            .map(|_| ())
            .map_err(|e| BusError::Transport(e.to_string()))
    }

    async fn subscribe(&self, room_id: Uuid) -> BusResult<broadcast::Receiver<RoomEvent>> {
        Ok(self.sender(room_id).subscribe())
    }
}

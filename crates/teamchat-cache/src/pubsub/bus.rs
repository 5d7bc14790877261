//! The event-bus port

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use teamchat_core::events::RoomEvent;

/// Error type for event bus operations
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Bus is shut down")]
    Closed,
}

/// Result type for event bus operations
pub type BusResult<T> = Result<T, BusError>;

/// Port for publish/subscribe fan-out over room streams.
///
/// At-most-once, best-effort: no acknowledgment, no replay. A lagging
/// receiver drops the oldest buffered events.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish an event to its room's stream
    async fn publish(&self, event: &RoomEvent) -> BusResult<()>;

    /// Subscribe to a room's stream
    async fn subscribe(&self, room_id: Uuid) -> BusResult<broadcast::Receiver<RoomEvent>>;
}

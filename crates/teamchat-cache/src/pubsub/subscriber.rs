//! Redis Pub/Sub subscriber
//!
//! A background task owns the Redis subscription connection, reconnects on
//! failure, and fans received payloads into per-room broadcast channels.

use dashmap::DashMap;
use futures_util::StreamExt;
use redis::Client;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use teamchat_core::events::RoomEvent;

use super::bus::{BusError, BusResult};
use super::stream::RoomStream;

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Redis connection URL
    pub redis_url: String,
    /// Per-room broadcast buffer size
    pub broadcast_buffer: usize,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            broadcast_buffer: 256,
            reconnect_delay_ms: 1000,
        }
    }
}

/// Commands for subscription management
#[derive(Debug)]
enum SubscriberCommand {
    Subscribe(String),
    Shutdown,
}

/// Fans Redis Pub/Sub messages into per-room broadcast senders
pub struct RoomSubscriber {
    senders: Arc<DashMap<Uuid, broadcast::Sender<RoomEvent>>>,
    control_tx: mpsc::Sender<SubscriberCommand>,
    broadcast_buffer: usize,
}

impl RoomSubscriber {
    /// Create a subscriber and start its background listener
    #[must_use]
    pub fn new(config: SubscriberConfig) -> Self {
        let senders: Arc<DashMap<Uuid, broadcast::Sender<RoomEvent>>> = Arc::new(DashMap::new());
        let (control_tx, control_rx) = mpsc::channel(32);
        let broadcast_buffer = config.broadcast_buffer;

        tokio::spawn(Self::listener_loop(config, senders.clone(), control_rx));

        Self {
            senders,
            control_tx,
            broadcast_buffer,
        }
    }

    /// Subscribe to a room's stream, registering it with the listener
    pub async fn subscribe(&self, room_id: Uuid) -> BusResult<broadcast::Receiver<RoomEvent>> {
        let receiver = self
            .senders
            .entry(room_id)
            .or_insert_with(|| broadcast::channel(self.broadcast_buffer).0)
            .subscribe();

        self.control_tx
            .send(SubscriberCommand::Subscribe(RoomStream::new(room_id).name()))
            .await
            .map_err(|_| BusError::Closed)?;

        Ok(receiver)
    }

    /// Shut down the background listener
    pub async fn shutdown(&self) -> BusResult<()> {
        self.control_tx
            .send(SubscriberCommand::Shutdown)
            .await
            .map_err(|_| BusError::Closed)
    }

    /// Background listener loop with reconnect
    async fn listener_loop(
        config: SubscriberConfig,
        senders: Arc<DashMap<Uuid, broadcast::Sender<RoomEvent>>>,
        mut control_rx: mpsc::Receiver<SubscriberCommand>,
    ) {
        loop {
            match Self::run_listener(&config, &senders, &mut control_rx).await {
                Ok(()) => {
                    tracing::info!("Room subscriber shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Room subscriber error, reconnecting...");
                    tokio::time::sleep(tokio::time::Duration::from_millis(
                        config.reconnect_delay_ms,
                    ))
                    .await;
                }
            }
        }
    }

    /// Run the listener until shutdown (Ok) or a connection error (Err)
    async fn run_listener(
        config: &SubscriberConfig,
        senders: &Arc<DashMap<Uuid, broadcast::Sender<RoomEvent>>>,
        control_rx: &mut mpsc::Receiver<SubscriberCommand>,
    ) -> Result<(), redis::RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let mut pubsub = client.get_async_pubsub().await?;

        // Re-establish every known room subscription after a reconnect
        let known: Vec<String> = senders
            .iter()
            .map(|entry| RoomStream::new(*entry.key()).name())
            .collect();
        for stream in &known {
            pubsub.subscribe(stream).await?;
        }

        tracing::info!(streams = known.len(), "Room subscriber connected to Redis");

        let mut stream = pubsub.on_message();

        loop {
            tokio::select! {
                msg = stream.next() => {
                    match msg {
                        Some(msg) => {
                            let channel_name = msg.get_channel_name().to_string();
                            let payload: String = msg.get_payload().unwrap_or_default();
                            Self::dispatch(senders, &channel_name, &payload);
                        }
                        None => {
                            tracing::warn!("Pub/Sub stream ended");
                            return Err(redis::RedisError::from((
                                redis::ErrorKind::IoError,
                                "pubsub stream ended",
                            )));
                        }
                    }
                }

                cmd = control_rx.recv() => {
                    match cmd {
                        Some(SubscriberCommand::Subscribe(name)) => {
                            // The message stream borrows pubsub; release it
                            // around subscription changes
                            drop(stream);
                            if let Err(e) = pubsub.subscribe(&name).await {
                                tracing::error!(stream = %name, error = %e, "Failed to subscribe");
                            } else {
                                tracing::debug!(stream = %name, "Subscribed to room stream");
                            }
                            stream = pubsub.on_message();
                        }
                        Some(SubscriberCommand::Shutdown) | None => {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Route one received payload to its room's broadcast channel
    fn dispatch(
        senders: &DashMap<Uuid, broadcast::Sender<RoomEvent>>,
        channel_name: &str,
        payload: &str,
    ) {
        let Some(stream) = RoomStream::parse(channel_name) else {
            tracing::warn!(channel = %channel_name, "Ignoring message on foreign channel");
            return;
        };

        let event: RoomEvent = match serde_json::from_str(payload) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(channel = %channel_name, error = %e, "Dropping unparseable event");
                return;
            }
        };

        if let Some(sender) = senders.get(&stream.room_id()) {
            // No receivers is fine; at-most-once delivery
            let _ = sender.send(event);
        }
    }
}

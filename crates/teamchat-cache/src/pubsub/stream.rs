//! Room stream naming

use uuid::Uuid;

/// Prefix of every room stream name
pub const ROOM_STREAM_PREFIX: &str = "chat_room_";

/// The named stream a room's events are published on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomStream(pub Uuid);

impl RoomStream {
    /// Create a stream handle for a room
    #[must_use]
    pub fn new(room_id: Uuid) -> Self {
        Self(room_id)
    }

    /// The stream name, `chat_room_<room-id>`
    #[must_use]
    pub fn name(&self) -> String {
        format!("{ROOM_STREAM_PREFIX}{}", self.0)
    }

    /// Parse a stream name back to the room it belongs to
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let id = name.strip_prefix(ROOM_STREAM_PREFIX)?;
        id.parse::<Uuid>().ok().map(Self)
    }

    /// The room this stream belongs to
    #[must_use]
    pub fn room_id(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RoomStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

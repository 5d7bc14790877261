//! Chat room entity
//!
//! A room is either a named group channel or a direct-message channel
//! between exactly two users. Direct rooms are identified by the
//! order-independent pair of their members.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Chat room entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: Uuid,
    /// Display name; always present for group rooms, absent for direct rooms
    pub name: Option<String>,
    pub is_direct: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatRoom {
    /// Create a new group room with a display name
    pub fn new_group(id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: Some(name.into()),
            is_direct: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new direct-message room (no display name)
    pub fn new_direct(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: None,
            is_direct: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the room invariants
    ///
    /// # Errors
    /// Returns `DomainError::RoomNameRequired` for a group room without a
    /// non-empty name.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.is_direct && self.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(DomainError::RoomNameRequired);
        }
        Ok(())
    }

    /// Display name shown to members
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Direct message")
    }

    /// Rename the room and touch the update timestamp
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
        self.updated_at = Utc::now();
    }
}

/// Deterministic lookup key for a direct-message room.
///
/// Order-independent: `direct_pair_key(a, b) == direct_pair_key(b, a)`.
#[must_use]
pub fn direct_pair_key(a: Uuid, b: Uuid) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("{lo}:{hi}")
}

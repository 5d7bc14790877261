//! User entity - the minimal account shape the chat flow needs

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User
    pub fn new(id: Uuid, display_name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            display_name: display_name.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

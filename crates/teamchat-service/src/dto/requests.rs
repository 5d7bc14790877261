//! Request DTOs

use serde::Deserialize;
use validator::Validate;

/// Request to create a named group room
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 100, message = "Room name must be 1-100 characters"))]
    pub name: String,
}

impl CreateRoomRequest {
    /// Create a new request
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An inbound message: text and/or a single attachment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendMessageRequest {
    pub content: Option<String>,
    pub attachment: Option<AttachmentInput>,
}

impl SendMessageRequest {
    /// A plain text message
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Attach a file to the request
    #[must_use]
    pub fn with_attachment(mut self, attachment: AttachmentInput) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// An uploaded blob with its declared metadata
#[derive(Clone, Deserialize)]
pub struct AttachmentInput {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl AttachmentInput {
    /// Create a new attachment input
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Declared size in bytes
    #[must_use]
    pub fn size(&self) -> i64 {
        self.data.len() as i64
    }
}

impl std::fmt::Debug for AttachmentInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentInput")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

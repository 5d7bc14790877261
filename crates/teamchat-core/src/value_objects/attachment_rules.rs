//! Attachment upload policy
//!
//! Checks run in a fixed order so every rejection carries the first rule
//! that failed: size, content type, filename length, filename denylist.
//! The denylist applies regardless of the declared content type.

use crate::error::DomainError;

/// Maximum attachment size: 10 MiB
pub const MAX_ATTACHMENT_BYTES: i64 = 10 * 1024 * 1024;

/// Maximum filename length in characters
pub const MAX_FILENAME_CHARS: usize = 255;

/// Content types accepted for upload
pub const ALLOWED_CONTENT_TYPES: [&str; 11] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "text/plain",
    "text/csv",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Filename extensions rejected outright (case-insensitive)
pub const BLOCKED_EXTENSIONS: [&str; 5] = [".exe", ".bat", ".cmd", ".scr", ".vbs"];

/// A proposed attachment, before any bytes are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    pub filename: String,
    pub content_type: String,
    pub size: i64,
}

impl AttachmentUpload {
    /// Create a new upload descriptor
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, size: i64) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            size,
        }
    }

    /// Validate the upload against the policy
    ///
    /// # Errors
    /// Returns the specific `DomainError` for the first rule violated.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.size > MAX_ATTACHMENT_BYTES {
            return Err(DomainError::AttachmentTooLarge {
                max_bytes: MAX_ATTACHMENT_BYTES,
            });
        }

        if !ALLOWED_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err(DomainError::UnsupportedAttachmentType(
                self.content_type.clone(),
            ));
        }

        if self.filename.chars().count() > MAX_FILENAME_CHARS {
            return Err(DomainError::FilenameTooLong {
                max: MAX_FILENAME_CHARS,
            });
        }

        let lower = self.filename.to_ascii_lowercase();
        if BLOCKED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return Err(DomainError::BlockedFilename(self.filename.clone()));
        }

        Ok(())
    }
}

//! Value objects - content and attachment rules

mod attachment_rules;
mod content;

pub use attachment_rules::{
    AttachmentUpload, ALLOWED_CONTENT_TYPES, BLOCKED_EXTENSIONS, MAX_ATTACHMENT_BYTES,
    MAX_FILENAME_CHARS,
};
pub use content::{sanitize_inline_html, ALLOWED_INLINE_TAGS, MAX_MESSAGE_CHARS};

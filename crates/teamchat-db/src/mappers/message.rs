//! Message and attachment entity <-> model mappers

use teamchat_core::entities::{Attachment, Message};

use crate::models::{AttachmentModel, MessageModel};

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: model.id,
            room_id: model.room_id,
            author_id: model.author_id,
            content: model.content,
            read: model.read,
            read_at: model.read_at,
            created_at: model.created_at,
        }
    }
}

impl From<AttachmentModel> for Attachment {
    fn from(model: AttachmentModel) -> Self {
        Attachment {
            id: model.id,
            message_id: model.message_id,
            filename: model.filename,
            content_type: model.content_type,
            size: model.size,
            storage_key: model.storage_key,
            created_at: model.created_at,
        }
    }
}

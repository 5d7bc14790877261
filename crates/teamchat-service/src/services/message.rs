//! Message service
//!
//! Ingestion pipeline: membership re-check, ordered validation with
//! field-attributable rejections, inline-HTML sanitization, blob storage,
//! persistence, and best-effort fan-out. Nothing is persisted until every
//! validation has passed.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use teamchat_core::entities::{Attachment, Message, User};
use teamchat_core::events::{
    AttachmentPayload, MessageCreatedEvent, MessagePayload, RoomEvent, TypingEvent,
};
use teamchat_core::value_objects::{sanitize_inline_html, AttachmentUpload, MAX_MESSAGE_CHARS};
use teamchat_core::DomainError;

use crate::dto::{MessageResponse, SendMessageRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::guard::MembershipGuard;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ingest a message into a room.
    ///
    /// Validation runs in a fixed order, each rule with its own rejection
    /// reason: membership, content-or-attachment presence, sanitized
    /// content length, attachment policy. Membership is re-checked here on
    /// every call so a revocation takes effect promptly, whatever an
    /// earlier subscription check said.
    #[instrument(skip(self, request))]
    pub async fn send_message(
        &self,
        room_id: Uuid,
        author_id: Uuid,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        MembershipGuard::new(self.ctx).authorize(room_id, author_id).await?;

        let content = request.content.unwrap_or_default();
        if content.trim().is_empty() && request.attachment.is_none() {
            return Err(DomainError::EmptyMessage.into());
        }

        // Sanitize before the length check so the bound applies to what
        // is actually stored
        let sanitized = sanitize_inline_html(&content);
        if sanitized.chars().count() > MAX_MESSAGE_CHARS {
            return Err(DomainError::ContentTooLong {
                max: MAX_MESSAGE_CHARS,
            }
            .into());
        }

        if let Some(input) = &request.attachment {
            AttachmentUpload::new(&input.filename, &input.content_type, input.size())
                .validate()?;
        }

        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or(DomainError::UserNotFound(author_id))?;

        let message = Message::new(Uuid::new_v4(), room_id, author_id, sanitized);

        // Store the blob before the rows so a storage failure leaves no
        // dangling message
        let stored = match request.attachment {
            Some(input) => {
                let size = input.size();
                let storage_key = self
                    .ctx
                    .file_store()
                    .put(&input.data, &input.filename, &input.content_type)
                    .await?;
                Some(Attachment::new(
                    Uuid::new_v4(),
                    message.id,
                    input.filename,
                    input.content_type,
                    size,
                    storage_key,
                ))
            }
            None => None,
        };

        self.ctx.message_repo().create(&message).await?;

        let attachment_payload = match &stored {
            Some(attachment) => {
                self.ctx.attachment_repo().create(attachment).await?;
                let url = self
                    .ctx
                    .file_store()
                    .signed_url(&attachment.storage_key, &attachment.filename)?;
                Some(AttachmentPayload {
                    id: attachment.id,
                    filename: attachment.filename.clone(),
                    content_type: attachment.content_type.clone(),
                    size: attachment.size,
                    url,
                })
            }
            None => None,
        };

        info!(
            message_id = %message.id,
            room_id = %room_id,
            has_attachment = stored.is_some(),
            "Message sent"
        );

        let payload = Self::payload(&message, &author, attachment_payload);
        self.publish(RoomEvent::MessageCreated(MessageCreatedEvent::new(
            payload.clone(),
        )))
        .await;

        Ok(MessageResponse::from(payload))
    }

    /// Broadcast an ephemeral typing indicator; nothing is persisted
    #[instrument(skip(self))]
    pub async fn send_typing(&self, room_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        MembershipGuard::new(self.ctx).authorize(room_id, user_id).await?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        self.publish(RoomEvent::Typing(TypingEvent::new(
            room_id,
            user_id,
            user.display_name,
        )))
        .await;

        Ok(())
    }

    /// Best-effort fan-out: a publish failure is logged, never surfaced
    async fn publish(&self, event: RoomEvent) {
        if let Err(e) = self.ctx.event_bus().publish(&event).await {
            warn!(
                room_id = %event.room_id(),
                event_type = event.event_type(),
                error = %e,
                "Failed to publish room event"
            );
        }
    }

    fn payload(
        message: &Message,
        author: &User,
        attachment: Option<AttachmentPayload>,
    ) -> MessagePayload {
        MessagePayload {
            id: message.id,
            room_id: message.room_id,
            author_id: message.author_id,
            author_name: author.display_name.clone(),
            content: message.content.clone(),
            attachment,
            created_at: message.created_at,
        }
    }
}

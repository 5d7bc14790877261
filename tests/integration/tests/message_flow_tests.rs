//! Message ingestion and fan-out scenarios
//!
//! Runs the services end-to-end over the in-memory ports: membership
//! gating, ordered validation, sanitization, attachments, and broadcast
//! delivery.

use integration_tests::TestEnv;
use teamchat_core::events::RoomEvent;
use teamchat_core::DomainError;
use teamchat_service::dto::{AttachmentInput, SendMessageRequest};
use teamchat_service::{MessageService, ServiceError, SubscriptionService};
use uuid::Uuid;

const MIB: usize = 1024 * 1024;

// ============================================================================
// Membership gating
// ============================================================================

#[tokio::test]
async fn test_non_member_send_is_denied_without_detail() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let mallory = env.create_user("Mallory").await;
    let room = env.create_room("engineering", &ada, &[]).await;

    let err = MessageService::new(&env.ctx)
        .send_message(room, mallory.id, SendMessageRequest::text("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Denied));
    // The denial reads the same whether or not the room exists
    let missing = MessageService::new(&env.ctx)
        .send_message(Uuid::new_v4(), mallory.id, SendMessageRequest::text("hi"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), missing.to_string());
}

#[tokio::test]
async fn test_non_member_subscribe_is_denied() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let mallory = env.create_user("Mallory").await;
    let room = env.create_room("engineering", &ada, &[]).await;

    let err = SubscriptionService::new(&env.ctx)
        .subscribe(room, mallory.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Denied));
}

#[tokio::test]
async fn test_revoked_member_cannot_send() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("engineering", &ada, &[&bob]).await;

    let service = MessageService::new(&env.ctx);
    service
        .send_message(room, bob.id, SendMessageRequest::text("still here"))
        .await
        .unwrap();

    teamchat_service::RoomService::new(&env.ctx)
        .remove_member(room, bob.id)
        .await
        .unwrap();

    // Ingestion re-checks membership, so the revocation bites immediately
    // even though an accessibility entry was cached moments ago
    let err = service
        .send_message(room, bob.id, SendMessageRequest::text("gone"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Denied));
}

// ============================================================================
// Validation order and rejection reasons
// ============================================================================

#[tokio::test]
async fn test_message_requires_content_or_attachment() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let room = env.create_room("engineering", &ada, &[]).await;
    let service = MessageService::new(&env.ctx);

    let err = service
        .send_message(room, ada.id, SendMessageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::EmptyMessage)
    ));

    // Whitespace-only content is empty too
    let err = service
        .send_message(room, ada.id, SendMessageRequest::text("   "))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::EmptyMessage)
    ));

    // Either side alone is enough
    service
        .send_message(room, ada.id, SendMessageRequest::text("text only"))
        .await
        .unwrap();
    service
        .send_message(
            room,
            ada.id,
            SendMessageRequest::default().with_attachment(AttachmentInput::new(
                "notes.txt",
                "text/plain",
                b"attached".to_vec(),
            )),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_content_length_is_bounded_after_sanitization() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let room = env.create_room("engineering", &ada, &[]).await;
    let service = MessageService::new(&env.ctx);

    let err = service
        .send_message(room, ada.id, SendMessageRequest::text("x".repeat(2001)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ContentTooLong { max: 2000 })
    ));

    // Over the bound only because of markup that sanitization strips
    let wrapped = format!("<div>{}</div>", "y".repeat(1995));
    service
        .send_message(room, ada.id, SendMessageRequest::text(wrapped))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rejected_message_is_not_persisted() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let room = env.create_room("engineering", &ada, &[]).await;

    let _ = MessageService::new(&env.ctx)
        .send_message(room, ada.id, SendMessageRequest::text("x".repeat(5000)))
        .await
        .unwrap_err();

    assert_eq!(env.store.message_count(), 0);
    assert_eq!(env.file_store.blob_count(), 0);
}

// ============================================================================
// Sanitization
// ============================================================================

#[tokio::test]
async fn test_content_is_sanitized_before_persistence() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let room = env.create_room("engineering", &ada, &[]).await;

    let response = MessageService::new(&env.ctx)
        .send_message(
            room,
            ada.id,
            SendMessageRequest::text("<script>alert(1)</script><b>ship it</b>"),
        )
        .await
        .unwrap();

    assert_eq!(response.content, "alert(1)<b>ship it</b>");

    let persisted = env.store.message(response.id).expect("persisted");
    assert_eq!(persisted.content, response.content);
    assert!(!persisted.read);
    assert!(persisted.read_at.is_none());
}

// ============================================================================
// Attachments
// ============================================================================

#[tokio::test]
async fn test_oversize_attachment_is_rejected() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let room = env.create_room("engineering", &ada, &[]).await;

    let err = MessageService::new(&env.ctx)
        .send_message(
            room,
            ada.id,
            SendMessageRequest::default().with_attachment(AttachmentInput::new(
                "big.png",
                "image/png",
                vec![0u8; 11 * MIB],
            )),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AttachmentTooLarge { .. })
    ));
    assert_eq!(env.file_store.blob_count(), 0);
}

#[tokio::test]
async fn test_nine_mib_png_is_accepted_with_signed_url() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let room = env.create_room("engineering", &ada, &[]).await;

    let response = MessageService::new(&env.ctx)
        .send_message(
            room,
            ada.id,
            SendMessageRequest::text("screenshot").with_attachment(AttachmentInput::new(
                "screen.png",
                "image/png",
                vec![0u8; 9 * MIB],
            )),
        )
        .await
        .unwrap();

    let attachment = response.attachment.expect("attachment in response");
    assert_eq!(attachment.size, (9 * MIB) as i64);
    assert!(attachment.url.contains("screen.png"));
    assert_eq!(env.file_store.blob_count(), 1);
}

#[tokio::test]
async fn test_blocked_extension_beats_spoofed_content_type() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let room = env.create_room("engineering", &ada, &[]).await;

    let err = MessageService::new(&env.ctx)
        .send_message(
            room,
            ada.id,
            SendMessageRequest::default().with_attachment(AttachmentInput::new(
                "malware.exe",
                "image/png",
                vec![0u8; 64],
            )),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::BlockedFilename(_))
    ));
    assert_eq!(env.store.message_count(), 0);
}

// ============================================================================
// Fan-out
// ============================================================================

#[tokio::test]
async fn test_hello_reaches_subscriber_with_author_name() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("pair", &ada, &[&bob]).await;

    let mut rx = SubscriptionService::new(&env.ctx)
        .subscribe(room, bob.id)
        .await
        .unwrap();

    MessageService::new(&env.ctx)
        .send_message(room, ada.id, SendMessageRequest::text("hello"))
        .await
        .unwrap();

    match rx.try_recv().unwrap() {
        RoomEvent::MessageCreated(event) => {
            assert_eq!(event.message.room_id, room);
            assert_eq!(event.message.author_name, "Ada");
            assert_eq!(event.message.content, "hello");
        }
        other => panic!("unexpected event: {}", other.event_type()),
    }
}

#[tokio::test]
async fn test_typing_is_broadcast_but_never_persisted() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("pair", &ada, &[&bob]).await;

    let mut rx = SubscriptionService::new(&env.ctx)
        .subscribe(room, bob.id)
        .await
        .unwrap();

    MessageService::new(&env.ctx)
        .send_typing(room, ada.id)
        .await
        .unwrap();

    match rx.try_recv().unwrap() {
        RoomEvent::Typing(event) => {
            assert_eq!(event.user_id, ada.id);
            assert_eq!(event.display_name, "Ada");
        }
        other => panic!("unexpected event: {}", other.event_type()),
    }
    assert_eq!(env.store.message_count(), 0);
}

// ============================================================================
// Token authentication
// ============================================================================

#[tokio::test]
async fn test_subscribe_with_token() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let room = env.create_room("engineering", &ada, &[]).await;
    let service = SubscriptionService::new(&env.ctx);

    let token = env.jwt.issue_access_token(ada.id).unwrap();
    assert!(service.subscribe_with_token(room, &token).await.is_ok());

    assert!(service
        .subscribe_with_token(room, "not.a.token")
        .await
        .is_err());
}

//! Read-state, cached views, and room lifecycle scenarios

use chrono::Utc;
use integration_tests::TestEnv;
use teamchat_core::entities::Message;
use teamchat_core::DomainError;
use teamchat_service::dto::SendMessageRequest;
use teamchat_service::{
    MessageService, ReadStateTracker, RoomService, ServiceError, TaskOutcome,
};
use uuid::Uuid;

// ============================================================================
// Read-state tracking
// ============================================================================

#[tokio::test]
async fn test_hello_scenario_unread_then_read() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("pair", &ada, &[&bob]).await;

    let response = MessageService::new(&env.ctx)
        .send_message(room, ada.id, SendMessageRequest::text("hello"))
        .await
        .unwrap();
    assert!(!env.store.message(response.id).unwrap().read);

    let rooms = RoomService::new(&env.ctx);
    assert_eq!(rooms.unread_count(room, bob.id).await.unwrap(), 1);
    // The author never counts toward their own unread
    assert_eq!(rooms.unread_count(room, ada.id).await.unwrap(), 0);

    let marked = ReadStateTracker::new(&env.ctx)
        .mark_room_read(room, bob.id)
        .await
        .unwrap();
    assert_eq!(marked, 1);

    // The unread entry was invalidated, so this recomputes rather than
    // serving the cached 1
    assert_eq!(rooms.unread_count(room, bob.id).await.unwrap(), 0);

    let persisted = env.store.message(response.id).unwrap();
    assert!(persisted.read);
    assert!(persisted.read_at.is_some());
}

#[tokio::test]
async fn test_mark_read_is_idempotent_and_keeps_first_timestamp() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("pair", &ada, &[&bob]).await;

    let response = MessageService::new(&env.ctx)
        .send_message(room, ada.id, SendMessageRequest::text("hello"))
        .await
        .unwrap();

    let tracker = ReadStateTracker::new(&env.ctx);
    assert_eq!(tracker.mark_room_read(room, bob.id).await.unwrap(), 1);
    let first_read_at = env.store.message(response.id).unwrap().read_at;

    // Nothing newly unread: a no-op that touches no timestamps
    assert_eq!(tracker.mark_room_read(room, bob.id).await.unwrap(), 0);
    assert_eq!(env.store.message(response.id).unwrap().read_at, first_read_at);
}

#[tokio::test]
async fn test_author_messages_are_never_marked_by_author() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("pair", &ada, &[&bob]).await;

    let response = MessageService::new(&env.ctx)
        .send_message(room, ada.id, SendMessageRequest::text("hello"))
        .await
        .unwrap();

    let marked = ReadStateTracker::new(&env.ctx)
        .mark_room_read(room, ada.id)
        .await
        .unwrap();
    assert_eq!(marked, 0);
    assert!(!env.store.message(response.id).unwrap().read);
}

#[tokio::test]
async fn test_mark_read_batches_at_one_hundred() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("firehose", &ada, &[&bob]).await;

    for i in 0..150 {
        let message = Message::new(Uuid::new_v4(), room, ada.id, format!("msg {i}"));
        env.ctx.message_repo().create(&message).await.unwrap();
    }

    let tracker = ReadStateTracker::new(&env.ctx);
    assert_eq!(tracker.mark_room_read(room, bob.id).await.unwrap(), 100);
    assert_eq!(tracker.mark_room_read(room, bob.id).await.unwrap(), 50);
    assert_eq!(tracker.mark_room_read(room, bob.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_enqueued_mark_read_runs_in_background() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("pair", &ada, &[&bob]).await;

    MessageService::new(&env.ctx)
        .send_message(room, ada.id, SendMessageRequest::text("hello"))
        .await
        .unwrap();

    let handle = ReadStateTracker::new(&env.ctx).enqueue(&env.dispatcher, room, bob.id);
    let outcome = handle.await.unwrap();
    assert_eq!(outcome, TaskOutcome::Completed { attempts: 1 });

    assert_eq!(
        RoomService::new(&env.ctx)
            .unread_count(room, bob.id)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_enqueued_mark_read_for_vanished_room_fails_without_retry() {
    let env = TestEnv::new();
    let bob = env.create_user("Bob").await;

    let handle =
        ReadStateTracker::new(&env.ctx).enqueue(&env.dispatcher, Uuid::new_v4(), bob.id);
    let outcome = handle.await.unwrap();

    assert_eq!(outcome, TaskOutcome::Failed { attempts: 1 });
    assert_eq!(env.dispatcher.failed_task_count(), 1);
}

// ============================================================================
// Cached views and invalidation
// ============================================================================

#[tokio::test]
async fn test_views_reflect_room_contents() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("pair", &ada, &[&bob]).await;

    MessageService::new(&env.ctx)
        .send_message(room, ada.id, SendMessageRequest::text("hello"))
        .await
        .unwrap();

    let rooms = RoomService::new(&env.ctx);

    let members = rooms.member_list(room, ada.id).await.unwrap();
    assert_eq!(members.len(), 2);

    let last = rooms.last_message(room, ada.id).await.unwrap().unwrap();
    assert_eq!(last.content, "hello");
    assert_eq!(last.author_id, ada.id);

    let stats = rooms.stats(room, ada.id).await.unwrap();
    assert_eq!(stats.message_count, 1);
    assert_eq!(stats.member_count, 2);
    assert_eq!(stats.last_activity_at, Some(last.created_at));

    // Online is the documented membership-count estimate
    assert_eq!(rooms.online_count(room, ada.id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_member_list_is_served_from_cache_within_ttl() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("pair", &ada, &[&bob]).await;

    let rooms = RoomService::new(&env.ctx);
    assert_eq!(rooms.member_list(room, ada.id).await.unwrap().len(), 2);

    // Mutate the membership table behind the cache's back: the snapshot
    // keeps serving until something invalidates it
    env.ctx
        .membership_repo()
        .delete(room, bob.id)
        .await
        .unwrap();
    assert_eq!(rooms.member_list(room, ada.id).await.unwrap().len(), 2);

    env.views.invalidate_room(room).await.unwrap();
    assert_eq!(rooms.member_list(room, ada.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_room_destroy_drops_every_cached_view() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let room = env.create_room("doomed", &ada, &[&bob]).await;

    // Warm several views, including user-suffixed ones
    let rooms = RoomService::new(&env.ctx);
    rooms.member_list(room, ada.id).await.unwrap();
    rooms.unread_count(room, bob.id).await.unwrap();
    rooms.stats(room, ada.id).await.unwrap();

    rooms.delete_room(room).await.unwrap();

    assert_eq!(env.views.get_members(room).await.unwrap(), None);
    assert_eq!(env.views.get_unread(room, bob.id).await.unwrap(), None);
    assert_eq!(env.views.get_stats(room).await.unwrap(), None);

    // Next access recomputes against the now-missing room and denies
    let err = rooms.unread_count(room, bob.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Denied));
}

// ============================================================================
// Room lifecycle
// ============================================================================

#[tokio::test]
async fn test_direct_room_is_deterministic_for_the_pair() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;

    let rooms = RoomService::new(&env.ctx);
    let first = rooms.open_direct(ada.id, bob.id).await.unwrap();
    let swapped = rooms.open_direct(bob.id, ada.id).await.unwrap();
    let again = rooms.open_direct(ada.id, bob.id).await.unwrap();

    assert_eq!(first.id, swapped.id);
    assert_eq!(first.id, again.id);
    assert!(first.is_direct);
    assert_eq!(first.name, None);

    // Both users ended up members exactly once
    assert_eq!(
        env.ctx.membership_repo().count_by_room(first.id).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn test_direct_room_with_self_is_rejected() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;

    let err = RoomService::new(&env.ctx)
        .open_direct(ada.id, ada.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::DirectMessageSelf)
    ));
}

#[tokio::test]
async fn test_room_delete_cascades_to_messages() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let room = env.create_room("doomed", &ada, &[]).await;

    MessageService::new(&env.ctx)
        .send_message(room, ada.id, SendMessageRequest::text("bye"))
        .await
        .unwrap();
    assert_eq!(env.store.message_count(), 1);

    RoomService::new(&env.ctx).delete_room(room).await.unwrap();
    assert_eq!(env.store.message_count(), 0);
}

#[tokio::test]
async fn test_unread_count_matches_definition_at_computation_point() {
    let env = TestEnv::new();
    let ada = env.create_user("Ada").await;
    let bob = env.create_user("Bob").await;
    let carol = env.create_user("Carol").await;
    let room = env.create_room("trio", &ada, &[&bob, &carol]).await;

    let service = MessageService::new(&env.ctx);
    service
        .send_message(room, ada.id, SendMessageRequest::text("one"))
        .await
        .unwrap();
    service
        .send_message(room, bob.id, SendMessageRequest::text("two"))
        .await
        .unwrap();

    // For each reader: messages by someone else with read == false
    let expected = env
        .ctx
        .message_repo()
        .count_unread(room, carol.id)
        .await
        .unwrap();
    assert_eq!(expected, 2);
    assert_eq!(
        RoomService::new(&env.ctx)
            .unread_count(room, carol.id)
            .await
            .unwrap(),
        expected
    );

    let now = Utc::now();
    env.ctx
        .message_repo()
        .mark_read_batch(room, carol.id, 100, now)
        .await
        .unwrap();
    assert_eq!(
        env.ctx
            .message_repo()
            .count_unread(room, carol.id)
            .await
            .unwrap(),
        0
    );
}

//! Helpers wiring the in-memory ports into a `ServiceContext`

use std::sync::Arc;
use uuid::Uuid;

use teamchat_cache::{InProcessEventBus, MemoryViewCache, RoomViewStore, ViewCache};
use teamchat_common::{JwtConfig, JwtService};
use teamchat_core::entities::{MemberRole, User};
use teamchat_service::dto::CreateRoomRequest;
use teamchat_service::{RoomService, ServiceContext, TaskDispatcher};

use crate::fixtures::{
    MemoryAttachmentRepository, MemoryFileStore, MemoryMembershipRepository,
    MemoryMessageRepository, MemoryRoomRepository, MemoryStore, MemoryUserRepository,
};

/// A fully wired test environment over in-memory ports
pub struct TestEnv {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    pub file_store: Arc<MemoryFileStore>,
    pub views: RoomViewStore,
    pub jwt: Arc<JwtService>,
    pub dispatcher: TaskDispatcher,
}

impl TestEnv {
    /// Build a fresh environment
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let file_store = Arc::new(MemoryFileStore::new());
        let cache: Arc<dyn ViewCache> = Arc::new(MemoryViewCache::new());
        let views = RoomViewStore::new(cache);
        let jwt = Arc::new(JwtService::new(&JwtConfig {
            secret: "integration-test-secret-32-bytes!!".to_string(),
            access_token_expiry: 900,
        }));

        let ctx = ServiceContext::builder()
            .room_repo(Arc::new(MemoryRoomRepository::new(store.clone())))
            .membership_repo(Arc::new(MemoryMembershipRepository::new(store.clone())))
            .message_repo(Arc::new(MemoryMessageRepository::new(store.clone())))
            .attachment_repo(Arc::new(MemoryAttachmentRepository::new(store.clone())))
            .user_repo(Arc::new(MemoryUserRepository::new(store.clone())))
            .file_store(file_store.clone())
            .event_bus(Arc::new(InProcessEventBus::new()))
            .views(views.clone())
            .jwt_service(jwt.clone())
            .build()
            .expect("context wiring is complete");

        Self {
            ctx,
            store,
            file_store,
            views,
            jwt,
            dispatcher: TaskDispatcher::new(),
        }
    }

    /// Register a user
    pub async fn create_user(&self, name: &str) -> User {
        let user = User::new(
            Uuid::new_v4(),
            name,
            format!("{}@example.com", name.to_lowercase()),
        );
        self.ctx
            .user_repo()
            .create(&user)
            .await
            .expect("user insert");
        user
    }

    /// Create a group room owned by `creator` with the given extra members
    pub async fn create_room(&self, name: &str, creator: &User, members: &[&User]) -> Uuid {
        let service = RoomService::new(&self.ctx);
        let room = service
            .create_room(creator.id, CreateRoomRequest::new(name))
            .await
            .expect("room create");

        for member in members {
            service
                .add_member(room.id, member.id, MemberRole::Member)
                .await
                .expect("member add");
        }

        room.id
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

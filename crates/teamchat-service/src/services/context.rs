//! Service context - dependency container for services
//!
//! Holds the repository, cache, file-store, and event-bus ports every
//! service works through. Infrastructure crates provide the concrete
//! implementations; tests plug in in-memory ones.

use std::sync::Arc;

use teamchat_cache::{EventBus, RoomViewStore};
use teamchat_common::{FileStore, JwtService};
use teamchat_core::traits::{
    AttachmentRepository, MembershipRepository, MessageRepository, RoomRepository, UserRepository,
};

use super::error::ServiceError;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    room_repo: Arc<dyn RoomRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    message_repo: Arc<dyn MessageRepository>,
    attachment_repo: Arc<dyn AttachmentRepository>,
    user_repo: Arc<dyn UserRepository>,

    file_store: Arc<dyn FileStore>,
    event_bus: Arc<dyn EventBus>,
    views: RoomViewStore,

    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Start building a context
    #[must_use]
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the room repository
    pub fn room_repo(&self) -> &dyn RoomRepository {
        self.room_repo.as_ref()
    }

    /// Get the membership repository
    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the attachment repository
    pub fn attachment_repo(&self) -> &dyn AttachmentRepository {
        self.attachment_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the file store
    pub fn file_store(&self) -> &dyn FileStore {
        self.file_store.as_ref()
    }

    /// Get the event bus
    pub fn event_bus(&self) -> &dyn EventBus {
        self.event_bus.as_ref()
    }

    /// Get the room view store
    pub fn views(&self) -> &RoomViewStore {
        &self.views
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("file_store", &"...")
            .field("event_bus", &"...")
            .finish()
    }
}

/// Builder for creating a ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    room_repo: Option<Arc<dyn RoomRepository>>,
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    attachment_repo: Option<Arc<dyn AttachmentRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    file_store: Option<Arc<dyn FileStore>>,
    event_bus: Option<Arc<dyn EventBus>>,
    views: Option<RoomViewStore>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room_repo(mut self, repo: Arc<dyn RoomRepository>) -> Self {
        self.room_repo = Some(repo);
        self
    }

    pub fn membership_repo(mut self, repo: Arc<dyn MembershipRepository>) -> Self {
        self.membership_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn attachment_repo(mut self, repo: Arc<dyn AttachmentRepository>) -> Self {
        self.attachment_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn file_store(mut self, store: Arc<dyn FileStore>) -> Self {
        self.file_store = Some(store);
        self
    }

    pub fn event_bus(mut self, bus: Arc<dyn EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn views(mut self, views: RoomViewStore) -> Self {
        self.views = Some(views);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> Result<ServiceContext, ServiceError> {
        Ok(ServiceContext {
            room_repo: self
                .room_repo
                .ok_or_else(|| ServiceError::validation("room_repo is required"))?,
            membership_repo: self
                .membership_repo
                .ok_or_else(|| ServiceError::validation("membership_repo is required"))?,
            message_repo: self
                .message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            attachment_repo: self
                .attachment_repo
                .ok_or_else(|| ServiceError::validation("attachment_repo is required"))?,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            file_store: self
                .file_store
                .ok_or_else(|| ServiceError::validation("file_store is required"))?,
            event_bus: self
                .event_bus
                .ok_or_else(|| ServiceError::validation("event_bus is required"))?,
            views: self
                .views
                .ok_or_else(|| ServiceError::validation("views is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        })
    }
}

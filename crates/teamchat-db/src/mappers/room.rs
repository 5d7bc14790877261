//! Chat room entity <-> model mapper

use teamchat_core::entities::ChatRoom;

use crate::models::ChatRoomModel;

impl From<ChatRoomModel> for ChatRoom {
    fn from(model: ChatRoomModel) -> Self {
        ChatRoom {
            id: model.id,
            name: model.name,
            is_direct: model.is_direct,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

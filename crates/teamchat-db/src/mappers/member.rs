//! Room membership entity <-> model mapper

use teamchat_core::entities::{MemberRole, RoomMember};

use crate::models::RoomMemberModel;

impl From<RoomMemberModel> for RoomMember {
    fn from(model: RoomMemberModel) -> Self {
        RoomMember {
            room_id: model.room_id,
            user_id: model.user_id,
            // The schema constrains the column to the closed role set
            role: model.role.parse().unwrap_or(MemberRole::Member),
            joined_at: model.joined_at,
        }
    }
}

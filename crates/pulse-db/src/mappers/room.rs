//! Room entity <-> model mappers

use pulse_core::{ChatRoom, DomainError, Id, RoomMember, RoomRole};

use crate::models::{ChatRoomModel, RoomMemberModel};

impl From<ChatRoomModel> for ChatRoom {
    fn from(model: ChatRoomModel) -> Self {
        ChatRoom {
            id: Id::new(model.id),
            name: model.name,
            last_message_at: model.last_message_at,
            created_at: model.created_at,
        }
    }
}

impl TryFrom<RoomMemberModel> for RoomMember {
    type Error = DomainError;

    fn try_from(model: RoomMemberModel) -> Result<Self, Self::Error> {
        let role: RoomRole = model.role.parse().map_err(DomainError::InternalError)?;

        Ok(RoomMember {
            room_id: Id::new(model.room_id),
            user_id: Id::new(model.user_id),
            role,
            active: model.active,
            joined_at: model.joined_at,
            last_read_at: model.last_read_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_member_model_lift() {
        let model = RoomMemberModel {
            room_id: 1,
            user_id: 2,
            role: "moderator".to_string(),
            active: true,
            joined_at: Utc::now(),
            last_read_at: None,
        };

        let member = RoomMember::try_from(model).unwrap();
        assert_eq!(member.role, RoomRole::Moderator);
        assert!(member.active);
    }
}

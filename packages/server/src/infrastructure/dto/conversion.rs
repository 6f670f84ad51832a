//! Conversion logic from domain entities to DTOs.

use sellgadgetz_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatMessage, ChatRoom, User};

use super::http::{MessageDto, RoomDto, UserDto};

impl From<&User> for UserDto {
    fn from(model: &User) -> Self {
        Self {
            id: model.id.value(),
            username: model.username.as_str().to_string(),
            email: model.email.as_str().to_string(),
            full_name: model.full_name.as_str().to_string(),
            phone: model.phone.clone(),
            is_admin: model.is_admin,
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

impl From<&ChatRoom> for RoomDto {
    fn from(model: &ChatRoom) -> Self {
        Self {
            id: model.id.value(),
            name: model.name.as_str().to_string(),
            kind: model.kind.as_str().to_string(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

impl From<&ChatMessage> for MessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            id: model.id.value(),
            room_id: model.room_id.value(),
            user_id: model.author_id.value(),
            message: model.content.as_str().to_string(),
            read: model.read,
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

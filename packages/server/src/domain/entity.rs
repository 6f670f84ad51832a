//! Domain entities.

use super::value_object::{
    Email, FullName, MessageContent, MessageId, ParticipantId, RoomId, RoomKind, RoomName,
    SessionToken, Timestamp, UserId, Username,
};

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub phone: Option<String>,
    /// PHC-formatted password hash
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

impl User {
    /// Identity and role of this user as seen by the chat use cases.
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            is_admin: self.is_admin,
        }
    }
}

/// Fields required to insert a user; the id and creation time are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub phone: Option<String>,
    pub password_hash: String,
    pub is_admin: bool,
}

/// The authenticated caller of a chat operation.
///
/// The chat core only needs the numeric user id and the administrator flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl Actor {
    /// Administrators may read and post in any room; everyone else must be a participant.
    pub fn can_access_room(&self, is_participant: bool) -> bool {
        self.is_admin || is_participant
    }
}

/// Chat room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: RoomId,
    pub name: RoomName,
    pub kind: RoomKind,
    pub created_at: Timestamp,
}

impl ChatRoom {
    pub fn is_support(&self) -> bool {
        self.kind == RoomKind::Support
    }
}

/// Membership of a user in a room. At most one exists per (room, user) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatParticipant {
    pub id: ParticipantId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub joined_at: Timestamp,
}

/// Persisted chat message.
///
/// `read` flips to true once a participant other than the author lists the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    pub author_id: UserId,
    pub content: MessageContent,
    pub read: bool,
    pub created_at: Timestamp,
}

impl ChatMessage {
    /// Whether this message counts towards `user_id`'s unread badge.
    pub fn is_unread_for(&self, user_id: UserId) -> bool {
        !self.read && self.author_id != user_id
    }
}

/// Login session bound to a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Session {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

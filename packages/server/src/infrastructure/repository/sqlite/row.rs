//! DB Row 定義と Domain Model への変換

use sqlx::FromRow;

use crate::domain::{
    ChatMessage, ChatParticipant, ChatRoom, Email, FullName, MessageContent, MessageId,
    ParticipantId, RepositoryError, RoomId, RoomKind, RoomName, Session, SessionToken, Timestamp,
    User, UserId, Username, ValueObjectError,
};

fn corrupted(table: &str, error: ValueObjectError) -> RepositoryError {
    RepositoryError::Corrupted(format!("{}: {}", table, error))
}

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub created_at: i64,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let convert = || -> Result<User, ValueObjectError> {
            Ok(User {
                id: UserId::new(row.id)?,
                username: Username::new(row.username)?,
                email: Email::new(row.email)?,
                full_name: FullName::new(row.full_name)?,
                phone: row.phone,
                password_hash: row.password,
                is_admin: row.is_admin,
                created_at: Timestamp::new(row.created_at),
            })
        };
        convert().map_err(|e| corrupted("users", e))
    }
}

#[derive(Debug, FromRow)]
pub struct SessionRow {
    pub token: String,
    pub user_id: i64,
    pub created_at: i64,
    pub expires_at: i64,
}

impl TryFrom<SessionRow> for Session {
    type Error = RepositoryError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let convert = || -> Result<Session, ValueObjectError> {
            Ok(Session {
                token: SessionToken::new(row.token)?,
                user_id: UserId::new(row.user_id)?,
                created_at: Timestamp::new(row.created_at),
                expires_at: Timestamp::new(row.expires_at),
            })
        };
        convert().map_err(|e| corrupted("sessions", e))
    }
}

#[derive(Debug, FromRow)]
pub struct ChatRoomRow {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub created_at: i64,
}

impl TryFrom<ChatRoomRow> for ChatRoom {
    type Error = RepositoryError;

    fn try_from(row: ChatRoomRow) -> Result<Self, Self::Error> {
        let convert = || -> Result<ChatRoom, ValueObjectError> {
            Ok(ChatRoom {
                id: RoomId::new(row.id)?,
                name: RoomName::new(row.name)?,
                kind: row.kind.parse::<RoomKind>()?,
                created_at: Timestamp::new(row.created_at),
            })
        };
        convert().map_err(|e| corrupted("chat_rooms", e))
    }
}

#[derive(Debug, FromRow)]
pub struct ChatParticipantRow {
    pub id: i64,
    pub room_id: i64,
    pub user_id: i64,
    pub created_at: i64,
}

impl TryFrom<ChatParticipantRow> for ChatParticipant {
    type Error = RepositoryError;

    fn try_from(row: ChatParticipantRow) -> Result<Self, Self::Error> {
        let convert = || -> Result<ChatParticipant, ValueObjectError> {
            Ok(ChatParticipant {
                id: ParticipantId::new(row.id)?,
                room_id: RoomId::new(row.room_id)?,
                user_id: UserId::new(row.user_id)?,
                joined_at: Timestamp::new(row.created_at),
            })
        };
        convert().map_err(|e| corrupted("chat_participants", e))
    }
}

#[derive(Debug, FromRow)]
pub struct ChatMessageRow {
    pub id: i64,
    pub room_id: i64,
    pub user_id: i64,
    pub message: String,
    pub read: bool,
    pub created_at: i64,
}

impl TryFrom<ChatMessageRow> for ChatMessage {
    type Error = RepositoryError;

    fn try_from(row: ChatMessageRow) -> Result<Self, Self::Error> {
        let convert = || -> Result<ChatMessage, ValueObjectError> {
            Ok(ChatMessage {
                id: MessageId::new(row.id)?,
                room_id: RoomId::new(row.room_id)?,
                author_id: UserId::new(row.user_id)?,
                content: MessageContent::new(row.message)?,
                read: row.read,
                created_at: Timestamp::new(row.created_at),
            })
        };
        convert().map_err(|e| corrupted("chat_messages", e))
    }
}

/// Convert a list of rows, failing on the first corrupted one.
pub fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, RepositoryError>
where
    T: TryFrom<R, Error = RepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_row_with_unknown_kind_is_corrupted() {
        // テスト項目: 未知の種別を持つルーム行は Corrupted エラーになる
        // given (前提条件):
        let row = ChatRoomRow {
            id: 1,
            name: "Legacy".to_string(),
            kind: "group".to_string(),
            created_at: 0,
        };

        // when (操作):
        let result = ChatRoom::try_from(row);

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::Corrupted(msg)) if msg.starts_with("chat_rooms")));
    }

    #[test]
    fn test_message_row_conversion() {
        // テスト項目: メッセージ行が Domain Model に変換される
        // given (前提条件):
        let row = ChatMessageRow {
            id: 7,
            room_id: 3,
            user_id: 2,
            message: "hello".to_string(),
            read: true,
            created_at: 1234,
        };

        // when (操作):
        let message = ChatMessage::try_from(row).unwrap();

        // then (期待する結果):
        assert_eq!(message.id.value(), 7);
        assert_eq!(message.room_id.value(), 3);
        assert_eq!(message.author_id.value(), 2);
        assert_eq!(message.content.as_str(), "hello");
        assert!(message.read);
    }
}

//! SQLite implementation of [`ChatRepository`].
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ルーム・参加者・メッセージの永続化と取得
//! - 参加者追加の冪等性、既読化、未読件数の集計
//!
//! ### なぜこのテストが必要か
//! - 参加者の重複は一意制約 + insert-or-ignore で防いでおり、SQL の正しさに依存する
//! - 既読化は「自分以外が書いたメッセージのみ」という条件を SQL で表現している
//! - 未読件数はバッジ表示に使われ、参加していないルームの件数を含めてはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：作成、取得、順序
//! - エッジケース：同一参加者の二重追加、同一時刻のメッセージ、未参加ルームのメッセージ

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::{
    ChatMessage, ChatParticipant, ChatRepository, ChatRoom, MessageContent, RepositoryError,
    RoomId, RoomKind, RoomName, Timestamp, UserId,
};

use super::{
    map_sqlx_error,
    row::{ChatMessageRow, ChatParticipantRow, ChatRoomRow, convert_all},
};

const ROOM_COLUMNS: &str = "r.id, r.name, r.kind, r.created_at";
const MESSAGE_COLUMNS: &str = "id, room_id, user_id, message, read, created_at";

/// sqlx + SQLite で永続化する ChatRepository
#[derive(Debug, Clone)]
pub struct SqliteChatRepository {
    pool: SqlitePool,
}

impl SqliteChatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_message(&self, id: i64) -> Result<ChatMessage, RepositoryError> {
        let sql = format!("SELECT {} FROM chat_messages WHERE id = ?", MESSAGE_COLUMNS);
        let row = sqlx::query_as::<_, ChatMessageRow>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        ChatMessage::try_from(row)
    }
}

#[async_trait]
impl ChatRepository for SqliteChatRepository {
    async fn find_room(&self, room_id: RoomId) -> Result<Option<ChatRoom>, RepositoryError> {
        let sql = format!("SELECT {} FROM chat_rooms r WHERE r.id = ?", ROOM_COLUMNS);
        let row = sqlx::query_as::<_, ChatRoomRow>(&sql)
            .bind(room_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        row.map(ChatRoom::try_from).transpose()
    }

    async fn find_rooms_by_user(&self, user_id: UserId) -> Result<Vec<ChatRoom>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM chat_rooms r \
             INNER JOIN chat_participants p ON p.room_id = r.id \
             WHERE p.user_id = ? \
             ORDER BY r.created_at ASC, r.id ASC",
            ROOM_COLUMNS
        );
        let rows = sqlx::query_as::<_, ChatRoomRow>(&sql)
            .bind(user_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        convert_all(rows)
    }

    async fn create_room(
        &self,
        name: RoomName,
        kind: RoomKind,
        created_at: Timestamp,
    ) -> Result<ChatRoom, RepositoryError> {
        let result = sqlx::query("INSERT INTO chat_rooms (name, kind, created_at) VALUES (?, ?, ?)")
            .bind(name.as_str())
            .bind(kind.as_str())
            .bind(created_at.value())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let room_id = RoomId::new(result.last_insert_rowid())
            .map_err(|e| RepositoryError::Corrupted(e.to_string()))?;
        tracing::debug!("Created {} room {} '{}'", kind, room_id, name);

        Ok(ChatRoom {
            id: room_id,
            name,
            kind,
            created_at,
        })
    }

    async fn add_participant(
        &self,
        room_id: RoomId,
        user_id: UserId,
        joined_at: Timestamp,
    ) -> Result<ChatParticipant, RepositoryError> {
        // 一意制約 (room_id, user_id) に任せて重複を無視する
        let result = sqlx::query(
            "INSERT INTO chat_participants (room_id, user_id, created_at) VALUES (?, ?, ?) \
             ON CONFLICT (room_id, user_id) DO NOTHING",
        )
        .bind(room_id.value())
        .bind(user_id.value())
        .bind(joined_at.value())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            tracing::debug!("User {} is already a participant of room {}", user_id, room_id);
        }

        let row = sqlx::query_as::<_, ChatParticipantRow>(
            "SELECT id, room_id, user_id, created_at FROM chat_participants \
             WHERE room_id = ? AND user_id = ?",
        )
        .bind(room_id.value())
        .bind(user_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        ChatParticipant::try_from(row)
    }

    async fn find_participants(
        &self,
        room_id: RoomId,
    ) -> Result<Vec<ChatParticipant>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChatParticipantRow>(
            "SELECT id, room_id, user_id, created_at FROM chat_participants \
             WHERE room_id = ? ORDER BY id ASC",
        )
        .bind(room_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        convert_all(rows)
    }

    async fn is_participant(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM chat_participants WHERE room_id = ? AND user_id = ?",
        )
        .bind(room_id.value())
        .bind(user_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(count > 0)
    }

    async fn create_message(
        &self,
        room_id: RoomId,
        author_id: UserId,
        content: MessageContent,
        created_at: Timestamp,
    ) -> Result<ChatMessage, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO chat_messages (room_id, user_id, message, read, created_at) \
             VALUES (?, ?, ?, FALSE, ?)",
        )
        .bind(room_id.value())
        .bind(author_id.value())
        .bind(content.as_str())
        .bind(created_at.value())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.find_message(result.last_insert_rowid()).await
    }

    async fn find_messages(&self, room_id: RoomId) -> Result<Vec<ChatMessage>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM chat_messages WHERE room_id = ? ORDER BY created_at ASC, id ASC",
            MESSAGE_COLUMNS
        );
        let rows = sqlx::query_as::<_, ChatMessageRow>(&sql)
            .bind(room_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        convert_all(rows)
    }

    async fn mark_messages_read(
        &self,
        room_id: RoomId,
        reader_id: UserId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE chat_messages SET read = TRUE \
             WHERE room_id = ? AND user_id <> ? AND read = FALSE",
        )
        .bind(room_id.value())
        .bind(reader_id.value())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }

    async fn count_unread(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM chat_messages m \
             INNER JOIN chat_participants p ON p.room_id = m.room_id AND p.user_id = ? \
             WHERE m.user_id <> ? AND m.read = FALSE",
        )
        .bind(user_id.value())
        .bind(user_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

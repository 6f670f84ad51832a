//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ChatMessage, ChatParticipant, ChatRoom, MessageContent, NewUser, RepositoryError, RoomId,
    RoomKind, RoomName, Session, SessionToken, Timestamp, User, UserId, Username,
};

/// Chat Repository trait
///
/// ルーム・参加者・メッセージへのアクセスを抽象化する。
/// 業務ルール（参加者チェック、管理者の自動参加など）は UseCase 層が持ち、
/// この trait は単純な述語までしか扱わない。
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// ID でルームを取得
    async fn find_room(&self, room_id: RoomId) -> Result<Option<ChatRoom>, RepositoryError>;

    /// ユーザーが参加しているルームを作成順に取得
    async fn find_rooms_by_user(&self, user_id: UserId) -> Result<Vec<ChatRoom>, RepositoryError>;

    /// ルームを作成
    async fn create_room(
        &self,
        name: RoomName,
        kind: RoomKind,
        created_at: Timestamp,
    ) -> Result<ChatRoom, RepositoryError>;

    /// 参加者を追加（冪等）
    ///
    /// 既に同じ (room, user) の行が存在する場合は、その行をそのまま返す。
    async fn add_participant(
        &self,
        room_id: RoomId,
        user_id: UserId,
        joined_at: Timestamp,
    ) -> Result<ChatParticipant, RepositoryError>;

    /// ルームの参加者を参加順に取得
    async fn find_participants(
        &self,
        room_id: RoomId,
    ) -> Result<Vec<ChatParticipant>, RepositoryError>;

    /// ユーザーがルームの参加者かどうか
    async fn is_participant(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError>;

    /// メッセージを保存（read = false）
    async fn create_message(
        &self,
        room_id: RoomId,
        author_id: UserId,
        content: MessageContent,
        created_at: Timestamp,
    ) -> Result<ChatMessage, RepositoryError>;

    /// ルームのメッセージを作成時刻の昇順で取得
    async fn find_messages(&self, room_id: RoomId) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// reader 以外が作成した未読メッセージを既読にし、更新件数を返す
    async fn mark_messages_read(
        &self,
        room_id: RoomId,
        reader_id: UserId,
    ) -> Result<u64, RepositoryError>;

    /// ユーザーが参加する全ルームの未読件数（自分のメッセージを除く）
    async fn count_unread(&self, user_id: UserId) -> Result<u64, RepositoryError>;
}

/// User Repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, RepositoryError>;

    async fn find_by_username(&self, username: &Username)
    -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// ユーザーを作成
    ///
    /// username / email の一意制約に違反した場合は `RepositoryError::Conflict` を返す。
    async fn create(&self, user: NewUser, created_at: Timestamp)
    -> Result<User, RepositoryError>;

    /// 管理者ユーザーを ID 順に取得
    async fn find_admins(&self) -> Result<Vec<User>, RepositoryError>;

    /// 全ユーザーを ID 順に取得
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;
}

/// Session Repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: Session) -> Result<(), RepositoryError>;

    /// `now` の時点で有効なセッションのみ返す
    async fn find_valid(
        &self,
        token: &SessionToken,
        now: Timestamp,
    ) -> Result<Option<Session>, RepositoryError>;

    async fn delete(&self, token: &SessionToken) -> Result<(), RepositoryError>;

    /// 期限切れのセッションを削除し、削除件数を返す
    async fn delete_expired(&self, now: Timestamp) -> Result<u64, RepositoryError>;
}

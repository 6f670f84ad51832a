//! UseCase: ルーム詳細の取得

use std::sync::Arc;

use crate::domain::{Actor, ChatRepository, ChatRoom, RoomId};

use super::{access::authorize_room_access, error::ChatError};

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// # Returns
    ///
    /// * `Err(ChatError::RoomNotFound)` - ルームが存在しない
    /// * `Err(ChatError::AccessDenied)` - 参加者でも管理者でもない
    pub async fn execute(&self, actor: Actor, room_id: RoomId) -> Result<ChatRoom, ChatError> {
        authorize_room_access(self.repository.as_ref(), &actor, room_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomKind, RoomName, Timestamp};
    use crate::usecase::test_support::TestContext;

    #[tokio::test]
    async fn test_room_detail_access_rules() {
        // テスト項目: 参加者と管理者は取得でき、それ以外は拒否され、未知の ID は NotFound
        // given (前提条件):
        let ctx = TestContext::new().await;
        let alice = ctx.user("alice").await;
        let mallory = ctx.user("mallory").await;
        let admin = ctx.admin("admin").await;
        let room = ctx
            .chat_repository
            .create_room(
                RoomName::new("Support".to_string()).unwrap(),
                RoomKind::Support,
                Timestamp::new(1),
            )
            .await
            .unwrap();
        ctx.chat_repository
            .add_participant(room.id, alice.id, Timestamp::new(1))
            .await
            .unwrap();
        let usecase = GetRoomDetailUseCase::new(ctx.chat_repository.clone());

        // when (操作):
        let as_participant = usecase.execute(alice.actor(), room.id).await;
        let as_admin = usecase.execute(admin.actor(), room.id).await;
        let as_stranger = usecase.execute(mallory.actor(), room.id).await;
        let unknown = usecase
            .execute(alice.actor(), RoomId::new(404).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(as_participant, Ok(room.clone()));
        assert_eq!(as_admin, Ok(room));
        assert_eq!(as_stranger, Err(ChatError::AccessDenied));
        assert_eq!(unknown, Err(ChatError::RoomNotFound));
    }
}

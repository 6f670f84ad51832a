//! UseCase: ユーザーのサポートルームの検索

use std::sync::Arc;

use crate::domain::{ChatRepository, ChatRoom, UserId};

use super::error::ChatError;

/// ユーザーが参加しているサポートルームを探すユースケース（作成はしない）
pub struct GetSupportRoomUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl GetSupportRoomUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// 参加ルームを作成順に走査し、最初のサポートルームを返す
    pub async fn execute(&self, user_id: UserId) -> Result<Option<ChatRoom>, ChatError> {
        let rooms = self.repository.find_rooms_by_user(user_id).await?;
        Ok(rooms.into_iter().find(ChatRoom::is_support))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomKind, RoomName, Timestamp};
    use crate::usecase::test_support::TestContext;

    #[tokio::test]
    async fn test_finds_support_room_among_joined_rooms() {
        // テスト項目: 参加ルームの中からサポートルームを見つける
        // given (前提条件):
        let ctx = TestContext::new().await;
        let alice = ctx.user("alice").await;
        let repo = &ctx.chat_repository;
        let direct = repo
            .create_room(
                RoomName::new("Notes".to_string()).unwrap(),
                RoomKind::Direct,
                Timestamp::new(1),
            )
            .await
            .unwrap();
        let support = repo
            .create_room(
                RoomName::new("Support".to_string()).unwrap(),
                RoomKind::Support,
                Timestamp::new(2),
            )
            .await
            .unwrap();
        for room in [&direct, &support] {
            repo.add_participant(room.id, alice.id, Timestamp::new(3))
                .await
                .unwrap();
        }
        let usecase = GetSupportRoomUseCase::new(ctx.chat_repository.clone());

        // when (操作):
        let found = usecase.execute(alice.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(found, Some(support));
    }

    #[tokio::test]
    async fn test_returns_none_without_creating() {
        // テスト項目: サポートルームがない場合は None を返し、作成はしない
        // given (前提条件):
        let ctx = TestContext::new().await;
        let alice = ctx.user("alice").await;
        let usecase = GetSupportRoomUseCase::new(ctx.chat_repository.clone());

        // when (操作):
        let found = usecase.execute(alice.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(found, None);
        assert!(
            ctx.chat_repository
                .find_rooms_by_user(alice.id)
                .await
                .unwrap()
                .is_empty()
        );
    }
}

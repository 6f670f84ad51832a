//! UseCase: 未読件数の取得
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetUnreadCountUseCase::execute() と一覧取得による既読化の組み合わせ
//!
//! ### なぜこのテストが必要か
//! - バッジの件数は「参加ルーム内で、自分以外が書いた未読メッセージ」の合計でなければならない
//!
//! ### どのような状況を想定しているか
//! - 参加者でない管理者が 2 つのルームに 3 件 / 2 件投稿し、ユーザーが両方を開く

use std::sync::Arc;

use crate::domain::{ChatRepository, UserId};

use super::error::ChatError;

/// 未読件数取得のユースケース
///
/// キャッシュせず、毎回集計クエリを実行する。
pub struct GetUnreadCountUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl GetUnreadCountUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<u64, ChatError> {
        Ok(self.repository.count_unread(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomKind, RoomName, Timestamp};
    use crate::usecase::{
        ListMessagesUseCase, SendMessageUseCase, test_support::TestContext,
    };

    #[tokio::test]
    async fn test_unread_count_across_rooms() {
        // テスト項目: 2 ルームに 3 件 / 2 件の未読があれば 5 件、両方を開くと 0 件になる
        // given (前提条件):
        let ctx = TestContext::new().await;
        let user = ctx.user("alice").await;
        let admin = ctx.admin("admin").await;
        let mut rooms = Vec::new();
        for name in ["Laptop order", "Repair request"] {
            let room = ctx
                .chat_repository
                .create_room(
                    RoomName::new(name.to_string()).unwrap(),
                    RoomKind::Direct,
                    Timestamp::new(1),
                )
                .await
                .unwrap();
            ctx.chat_repository
                .add_participant(room.id, user.id, Timestamp::new(1))
                .await
                .unwrap();
            rooms.push(room);
        }
        let send = SendMessageUseCase::new(ctx.chat_repository.clone(), ctx.clock.clone());
        for (room, count) in rooms.iter().zip([3, 2]) {
            for i in 0..count {
                send.execute(
                    admin.actor(),
                    room.id,
                    format!("update {}", i),
                )
                .await
                .unwrap();
            }
        }
        let usecase = GetUnreadCountUseCase::new(ctx.chat_repository.clone());
        let list = ListMessagesUseCase::new(ctx.chat_repository.clone());

        // when (操作):
        let before = usecase.execute(user.id).await.unwrap();
        list.execute(user.actor(), rooms[0].id).await.unwrap();
        let after_first = usecase.execute(user.id).await.unwrap();
        list.execute(user.actor(), rooms[1].id).await.unwrap();
        let after_both = usecase.execute(user.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(before, 5);
        assert_eq!(after_first, 2);
        assert_eq!(after_both, 0);
        // 管理者は参加者ではないので未読件数は 0
        assert_eq!(usecase.execute(admin.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_own_messages_are_never_unread() {
        // テスト項目: 自分のメッセージは未読件数に含まれない
        // given (前提条件):
        let ctx = TestContext::new().await;
        let user = ctx.user("alice").await;
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
            .add_participant(room.id, user.id, Timestamp::new(1))
            .await
            .unwrap();
        let send = SendMessageUseCase::new(ctx.chat_repository.clone(), ctx.clock.clone());
        send.execute(
            user.actor(),
            room.id,
            "my laptop is broken".to_string(),
        )
        .await
        .unwrap();
        let usecase = GetUnreadCountUseCase::new(ctx.chat_repository.clone());

        // when (操作):
        let count = usecase.execute(user.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(count, 0);
    }
}

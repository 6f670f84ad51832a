//! UseCase: サポートルームの取得または作成
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - EnsureSupportRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 1 ユーザーにつきサポートルームは 1 つだけ、という業務ルールをここで守っている
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回は作成、2 回目以降は既存のルームを返す
//! - エッジケース：同時に呼び出された場合

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChatRoom, RoomKind, RoomName, User};

use super::{
    create_room::CreateRoomUseCase, error::ChatError, get_support_room::GetSupportRoomUseCase,
};

/// サポートルームの取得結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsuredRoom {
    /// 既に存在していた
    Existing(ChatRoom),
    /// 今回作成した
    Created(ChatRoom),
}

impl EnsuredRoom {
    pub fn room(&self) -> &ChatRoom {
        match self {
            EnsuredRoom::Existing(room) | EnsuredRoom::Created(room) => room,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, EnsuredRoom::Created(_))
    }
}

/// サポートルームの get-or-create のユースケース
pub struct EnsureSupportRoomUseCase {
    get_support_room: Arc<GetSupportRoomUseCase>,
    create_room: Arc<CreateRoomUseCase>,
    /// 検索から作成までを直列化する（単一プロセス前提）
    creation_lock: Mutex<()>,
}

impl EnsureSupportRoomUseCase {
    pub fn new(
        get_support_room: Arc<GetSupportRoomUseCase>,
        create_room: Arc<CreateRoomUseCase>,
    ) -> Self {
        Self {
            get_support_room,
            create_room,
            creation_lock: Mutex::new(()),
        }
    }

    pub async fn execute(&self, user: &User) -> Result<EnsuredRoom, ChatError> {
        let _guard = self.creation_lock.lock().await;

        if let Some(room) = self.get_support_room.execute(user.id).await? {
            return Ok(EnsuredRoom::Existing(room));
        }

        let name = RoomName::new(format!("Support: {}", user.username))?;
        let room = self
            .create_room
            .execute(user.actor(), name, RoomKind::Support)
            .await?;
        Ok(EnsuredRoom::Created(room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatRepository;
    use crate::usecase::test_support::TestContext;

    fn create_usecase(ctx: &TestContext) -> Arc<EnsureSupportRoomUseCase> {
        let get_support_room = Arc::new(GetSupportRoomUseCase::new(ctx.chat_repository.clone()));
        let create_room = Arc::new(CreateRoomUseCase::new(
            ctx.chat_repository.clone(),
            ctx.user_repository.clone(),
            ctx.clock.clone(),
        ));
        Arc::new(EnsureSupportRoomUseCase::new(get_support_room, create_room))
    }

    async fn support_room_count(ctx: &TestContext, user: &User) -> usize {
        ctx.chat_repository
            .find_rooms_by_user(user.id)
            .await
            .unwrap()
            .iter()
            .filter(|room| room.is_support())
            .count()
    }

    #[tokio::test]
    async fn test_second_call_reuses_support_room() {
        // テスト項目: 2 回続けて呼び出してもサポートルームは 1 つだけ
        // given (前提条件):
        let ctx = TestContext::new().await;
        let alice = ctx.user("alice").await;
        let usecase = create_usecase(&ctx);

        // when (操作):
        let first = usecase.execute(&alice).await.unwrap();
        let second = usecase.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert!(first.is_created());
        assert_eq!(second, EnsuredRoom::Existing(first.room().clone()));
        assert_eq!(first.room().name.as_str(), "Support: alice");
        assert_eq!(support_room_count(&ctx, &alice).await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_calls_create_one_room() {
        // テスト項目: 同時に呼び出されてもサポートルームは 1 つだけ作成される
        // given (前提条件):
        let ctx = TestContext::new().await;
        let alice = ctx.user("alice").await;
        let usecase = create_usecase(&ctx);

        // when (操作):
        let (first, second) = tokio::join!(usecase.execute(&alice), usecase.execute(&alice));

        // then (期待する結果):
        let created = [first.unwrap(), second.unwrap()]
            .iter()
            .filter(|ensured| ensured.is_created())
            .count();
        assert_eq!(created, 1);
        assert_eq!(support_room_count(&ctx, &alice).await, 1);
    }

    #[tokio::test]
    async fn test_each_user_gets_their_own_room() {
        // テスト項目: 別のユーザーにはそれぞれのサポートルームが作成される
        // given (前提条件):
        let ctx = TestContext::new().await;
        let alice = ctx.user("alice").await;
        let bob = ctx.user("bob").await;
        let usecase = create_usecase(&ctx);

        // when (操作):
        let alice_room = usecase.execute(&alice).await.unwrap();
        let bob_room = usecase.execute(&bob).await.unwrap();

        // then (期待する結果):
        assert!(bob_room.is_created());
        assert_ne!(alice_room.room().id, bob_room.room().id);
    }
}

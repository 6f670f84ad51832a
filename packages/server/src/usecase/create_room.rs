//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - 作成者の自動参加、サポートルームへの管理者の自動参加
//!
//! ### なぜこのテストが必要か
//! - サポートルームは作成直後から全管理者が読み書きできなければならない
//! - 作成者が管理者の場合に参加者行が重複してはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：一般ユーザーがサポートルームを作成
//! - エッジケース：管理者がサポートルームを作成、direct ルームの作成

use std::sync::Arc;

use sellgadgetz_shared::time::Clock;

use crate::domain::{Actor, ChatRepository, ChatRoom, RoomKind, RoomName, Timestamp, UserRepository};

use super::error::ChatError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    chat_repository: Arc<dyn ChatRepository>,
    user_repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(
        chat_repository: Arc<dyn ChatRepository>,
        user_repository: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            chat_repository,
            user_repository,
            clock,
        }
    }

    /// ルームを作成し、作成者（サポートルームなら全管理者も）を参加させる
    pub async fn execute(
        &self,
        creator: Actor,
        name: RoomName,
        kind: RoomKind,
    ) -> Result<ChatRoom, ChatError> {
        let now = Timestamp::new(self.clock.now_millis());

        // 1. ルームを作成
        let room = self.chat_repository.create_room(name, kind, now).await?;

        // 2. 作成者を参加させる
        self.chat_repository
            .add_participant(room.id, creator.user_id, now)
            .await?;

        // 3. サポートルームの場合は作成者以外の全管理者を参加させる
        if room.is_support() {
            let admins = self.user_repository.find_admins().await?;
            for admin in admins.iter().filter(|admin| admin.id != creator.user_id) {
                self.chat_repository
                    .add_participant(room.id, admin.id, now)
                    .await?;
            }
            tracing::info!(
                "Support room {} created by user {} with {} administrator(s)",
                room.id,
                creator.user_id,
                admins.len()
            );
        } else {
            tracing::info!("Room {} created by user {}", room.id, creator.user_id);
        }

        Ok(room)
    }
}

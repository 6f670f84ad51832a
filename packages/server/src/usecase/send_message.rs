//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 参加者・管理者チェック、本文の検証、メッセージの永続化
//!
//! ### なぜこのテストが必要か
//! - 権限のないユーザーのメッセージは保存されてはならない
//! - 管理者は参加者行がなくても任意のルームに投稿できる
//! - 保存結果（ID・時刻）はそのままファンアウトに使われる
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者による送信、管理者による送信
//! - 異常系：非参加者による送信、存在しないルームへの送信、空の本文
//! - 非参加者の空の本文は検証より先に権限エラーになる

use std::sync::Arc;

use sellgadgetz_shared::time::Clock;

use crate::domain::{Actor, ChatMessage, ChatRepository, MessageContent, RoomId, Timestamp};

use super::{access::authorize_room_access, error::ChatError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 保存されたメッセージ（ID と作成時刻を含む）
    /// * `Err(ChatError)` - ルームが存在しない、権限がない、または本文が不正
    pub async fn execute(
        &self,
        author: Actor,
        room_id: RoomId,
        text: String,
    ) -> Result<ChatMessage, ChatError> {
        // 1. アクセス権の確認（本文の検証より先）
        authorize_room_access(self.repository.as_ref(), &author, room_id).await?;

        // 2. 本文の検証
        let content = MessageContent::new(text)?;

        // 3. 保存
        let created_at = Timestamp::new(self.clock.now_millis());
        let message = self
            .repository
            .create_message(room_id, author.user_id, content, created_at)
            .await?;

        tracing::debug!(
            "User {} posted message {} in room {}",
            author.user_id,
            message.id,
            room_id
        );
        Ok(message)
    }
}

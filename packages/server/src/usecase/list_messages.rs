//! UseCase: メッセージ一覧の取得（取得 = 既読化）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ListMessagesUseCase::execute() メソッド
//! - 一覧取得後に、自分以外のメッセージが既読になること
//!
//! ### なぜこのテストが必要か
//! - 既読化の明示的な操作は存在せず、一覧取得がその役割を兼ねている
//! - 自分のメッセージを自分で既読にしてしまうと、相手側の未読件数が壊れる
//!
//! ### どのような状況を想定しているか
//! - 正常系：相手の未読メッセージ 3 件と自分のメッセージ 1 件
//! - 異常系：非参加者による一覧取得

use std::sync::Arc;

use crate::domain::{Actor, ChatMessage, ChatRepository, RoomId};

use super::{access::authorize_room_access, error::ChatError};

/// メッセージ一覧取得のユースケース
pub struct ListMessagesUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl ListMessagesUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// ルームのメッセージを昇順で返し、その後 reader 以外のメッセージを既読にする
    ///
    /// 返り値は既読化する前の状態を表す。
    pub async fn execute(
        &self,
        reader: Actor,
        room_id: RoomId,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        authorize_room_access(self.repository.as_ref(), &reader, room_id).await?;

        let messages = self.repository.find_messages(room_id).await?;
        let marked = self
            .repository
            .mark_messages_read(room_id, reader.user_id)
            .await?;
        if marked > 0 {
            tracing::debug!(
                "Marked {} message(s) in room {} as read for user {}",
                marked,
                room_id,
                reader.user_id
            );
        }

        Ok(messages)
    }
}

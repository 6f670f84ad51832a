//! UseCase: 保存済みメッセージのファンアウト
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - FanOutMessageUseCase::execute() メソッド
//! - ルームの全参加者（送信者を含む）が配信対象になること
//!
//! ### なぜこのテストが必要か
//! - 参加者は配信のたびに取得し直す必要がある（キャッシュすると新しい参加者に届かない）
//! - 送信者の別タブにも同じメッセージが届かなければならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者 2 名のルームへの配信
//! - 異常系：MessagePusher の失敗

use std::sync::Arc;

use crate::domain::{ChatMessage, ChatRepository, MessagePusher, UserId};

use super::error::ChatError;

/// ファンアウトのユースケース
pub struct FanOutMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl FanOutMessageUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ルームの現在の参加者全員の接続へ payload を送信する
    ///
    /// # Arguments
    ///
    /// * `message` - 保存済みのメッセージ（Domain Model）
    /// * `payload` - 送信する JSON（DTO 層で生成されたもの）
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 送信できた接続数
    pub async fn execute(&self, message: &ChatMessage, payload: &str) -> Result<usize, ChatError> {
        let participants = self.repository.find_participants(message.room_id).await?;
        let targets: Vec<UserId> = participants.iter().map(|p| p.user_id).collect();

        let delivered = self.message_pusher.broadcast(&targets, payload).await?;
        tracing::debug!(
            "Message {} fanned out to {} connection(s) of {} participant(s)",
            message.id,
            delivered,
            targets.len()
        );
        Ok(delivered)
    }
}

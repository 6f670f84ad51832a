//! UseCase: WebSocket 接続の登録解除

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, UserId};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を登録解除する。登録されていなかった場合は false
    pub async fn execute(&self, user_id: UserId, connection_id: &ConnectionId) -> bool {
        let removed = self
            .message_pusher
            .unregister_connection(user_id, connection_id)
            .await;
        if !removed {
            tracing::warn!(
                "Connection '{}' of user {} was not registered",
                connection_id,
                user_id
            );
        }
        removed
    }
}

//! UseCase: WebSocket 接続の登録

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdFactory, MessagePusher, PusherChannel, UserId};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// OPEN になった接続を登録し、接続 ID を返す
    ///
    /// 同じユーザーの複数接続（複数タブ）を許容する。
    pub async fn execute(&self, user_id: UserId, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionIdFactory::generate();
        self.message_pusher
            .register_connection(user_id, connection_id.clone(), sender)
            .await;
        connection_id
    }
}

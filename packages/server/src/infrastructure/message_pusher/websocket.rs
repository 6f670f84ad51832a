//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - ユーザーごとの接続（`ConnectionId` → `UnboundedSender`）を管理
//! - 複数ユーザーの全接続への送信（broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、メッセージ送信に使用します。
//!
//! - UI 層: WebSocket 接続の受付、sender の生成、受信ループ
//! - Infrastructure 層: sender の管理、メッセージ送信
//!
//! 1 ユーザーが複数タブから接続できるため、レジストリは
//! `UserId → (ConnectionId → sender)` の 2 段のマップになっている。
//! 最後の接続が外れたユーザーのエントリは削除する。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, UserId};

type ConnectionMap = HashMap<UserId, HashMap<ConnectionId, PusherChannel>>;

/// プロセス内の接続レジストリを使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_connection(user_id, connection_id, tx).await;
///
/// // ルーム参加者の全タブに送信
/// pusher.broadcast(&[user_id], "{\"id\":1,\"message\":\"Hello\"}").await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    connections: Mutex<ConnectionMap>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1 ユーザーの OPEN な接続に送信し、送信できた数を返す
    fn send_to_user(
        user_id: UserId,
        connections: &HashMap<ConnectionId, PusherChannel>,
        content: &str,
    ) -> usize {
        let mut delivered = 0;
        for (connection_id, sender) in connections {
            // 受信側が閉じた接続は CLOSED 扱いでスキップ
            if sender.is_closed() {
                tracing::debug!(
                    "Skipping closed connection '{}' of user {}",
                    connection_id,
                    user_id
                );
                continue;
            }
            match sender.send(content.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    "Failed to push message to connection '{}' of user {}: {}",
                    connection_id,
                    user_id,
                    e
                ),
            }
        }
        delivered
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(
        &self,
        user_id: UserId,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) {
        let mut connections = self.connections.lock().await;
        let user_connections = connections.entry(user_id).or_default();
        user_connections.insert(connection_id.clone(), sender);
        tracing::debug!(
            "Connection '{}' of user {} registered ({} open)",
            connection_id,
            user_id,
            user_connections.len()
        );
    }

    async fn unregister_connection(&self, user_id: UserId, connection_id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let Some(user_connections) = connections.get_mut(&user_id) else {
            return false;
        };

        let removed = user_connections.remove(connection_id).is_some();
        if user_connections.is_empty() {
            connections.remove(&user_id);
        }
        tracing::debug!(
            "Connection '{}' of user {} unregistered",
            connection_id,
            user_id
        );
        removed
    }

    async fn broadcast(
        &self,
        targets: &[UserId],
        content: &str,
    ) -> Result<usize, MessagePushError> {
        let connections = self.connections.lock().await;

        let mut delivered = 0;
        for target in targets {
            match connections.get(target) {
                Some(user_connections) => {
                    delivered += Self::send_to_user(*target, user_connections, content);
                }
                None => {
                    tracing::debug!("User {} has no live connection, skipping", target);
                }
            }
        }

        Ok(delivered)
    }

    async fn connection_count(&self, user_id: UserId) -> usize {
        let connections = self.connections.lock().await;
        connections
            .get(&user_id)
            .map(|user_connections| {
                user_connections
                    .values()
                    .filter(|sender| !sender.is_closed())
                    .count()
            })
            .unwrap_or(0)
    }

    async fn close_all(&self) -> usize {
        let mut connections = self.connections.lock().await;
        let closed = connections.values().map(HashMap::len).sum();
        // sender を drop すると各接続の送信ループが終了する
        connections.clear();
        tracing::info!("Closed {} live connection(s)", closed);
        closed
    }
}

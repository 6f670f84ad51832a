//! MessagePusher trait 定義
//!
//! ## 概要
//!
//! 保存済みメッセージをライブ接続へ届けるためのポート（broadcaster）。
//! UseCase 層はこの trait にのみ依存し、WebSocket などの具体的な実装には依存しない。
//!
//! ## 接続の状態
//!
//! 接続は `CONNECTING → OPEN → CLOSED` と遷移する。
//! アップグレード完了（OPEN）後にのみ登録され、送信側が閉じた接続（CLOSED）は
//! push の対象から外れる。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, UserId};

/// 1 接続あたりの送信チャネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// ライブ接続へのメッセージ配信を抽象化する trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// OPEN になった接続を登録する
    async fn register_connection(
        &self,
        user_id: UserId,
        connection_id: ConnectionId,
        sender: PusherChannel,
    );

    /// 接続を登録解除する
    ///
    /// ユーザーの接続が 0 件になった場合、そのユーザーのエントリ自体を削除する。
    async fn unregister_connection(&self, user_id: UserId, connection_id: &ConnectionId) -> bool;

    /// 複数ユーザーの全ての OPEN 接続へ送信し、送信できた接続数を返す
    ///
    /// 接続のないユーザーや送信に失敗した接続はスキップする（部分失敗を許容）。
    async fn broadcast(&self, targets: &[UserId], content: &str)
    -> Result<usize, MessagePushError>;

    /// ユーザーの OPEN 接続数
    async fn connection_count(&self, user_id: UserId) -> usize;

    /// 全ての接続を破棄し、破棄した接続数を返す（サーバー停止時）
    async fn close_all(&self) -> usize;
}

//! WebSocket gateway.
//!
//! 接続は Cookie のセッションで認証し、upgrade 完了後（OPEN）に
//! 接続レジストリへ登録する。受信したチャットフレームは永続化してから
//! ルームの参加者全員の接続へファンアウトする。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    domain::{Actor, RoomId, User},
    infrastructure::dto::websocket::{InboundChatFrame, OutboundChatFrame},
    ui::{
        error::ApiError,
        extractor::{ApiQuery, AuthUser},
        state::AppState,
    },
    usecase::ChatError,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// 任意。指定された場合はセッションのユーザーと一致しなければならない
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

/// 1 フレームの処理に失敗した理由（ログに出して破棄する）
#[derive(Debug, Error)]
enum FrameError {
    #[error("malformed frame: {0}")]
    Malformed(serde_json::Error),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("failed to encode outbound frame: {0}")]
    Encode(serde_json::Error),
}

pub async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<ConnectQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    if query.user_id.is_some_and(|claimed| claimed != user.id.value()) {
        tracing::warn!(
            "User {} tried to open a socket as user {:?}",
            user.id,
            query.user_id
        );
        return Err(ApiError::Forbidden(
            "User id does not match the session".to_string(),
        ));
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user)))
}

/// Spawns a task that forwards messages pushed to this connection to the WebSocket.
///
/// The task ends when the channel is closed (unregistered, or the registry was
/// closed on shutdown) or when the socket can no longer be written.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    })
}

/// 受信したフレームを永続化し、ファンアウトする
///
/// # Returns
///
/// 送信できた接続数
async fn handle_frame(state: &AppState, author: Actor, text: &str) -> Result<usize, FrameError> {
    // 1. 形の検証
    let frame = serde_json::from_str::<InboundChatFrame>(text).map_err(FrameError::Malformed)?;
    let room_id = RoomId::new(frame.room_id).map_err(ChatError::from)?;

    // 2. 永続化（アクセス権の確認と本文の検証を含む）
    let message = state
        .send_message_usecase
        .execute(author, room_id, frame.message)
        .await?;

    // 3. 保存済みのメッセージを参加者の全接続へ
    let payload =
        serde_json::to_string(&OutboundChatFrame::from(&message)).map_err(FrameError::Encode)?;
    let delivered = state
        .fan_out_message_usecase
        .execute(&message, &payload)
        .await?;
    Ok(delivered)
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user: User) {
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state
        .connect_participant_usecase
        .execute(user.id, tx)
        .await;
    tracing::info!(
        "User {} '{}' connected as '{}'",
        user.id,
        user.username,
        connection_id
    );

    let (sender, mut receiver) = socket.split();
    let author = user.actor();
    let state_clone = state.clone();

    // Spawn a task to receive frames from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from user {}: {}", author.user_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match handle_frame(&state_clone, author, text.as_str()).await
                {
                    Ok(delivered) => tracing::debug!(
                        "Frame from user {} reached {} connection(s)",
                        author.user_id,
                        delivered
                    ),
                    // 不正なフレームは破棄し、接続は維持する
                    Err(e) => {
                        tracing::warn!("Dropped frame from user {}: {}", author.user_id, e)
                    }
                },
                Message::Close(_) => {
                    tracing::debug!("User {} requested close", author.user_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_participant_usecase
        .execute(user.id, &connection_id)
        .await;
    tracing::info!("User {} disconnected ('{}')", user.id, connection_id);
}

//! One WebSocket session against the chat server.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, http::StatusCode, protocol::Message},
};

use crate::{
    api::ApiClient,
    domain::{SessionProgress, unseen_messages},
    dto::{ChatFrame, MessageDto, RoomDto, UserDto},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Run the WebSocket client session
///
/// 1. Refetch the room history over REST and print what has not been shown
/// 2. Open the WebSocket with the session cookie
/// 3. Relay typed lines as chat frames and print incoming messages
///
/// Returns `Ok(())` when the input ends (Ctrl+C / Ctrl+D) and an error when
/// the connection is lost.
pub async fn run_client_session(
    api: &ApiClient,
    user: &UserDto,
    room: &RoomDto,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    progress: &mut SessionProgress,
    is_reconnect: bool,
) -> Result<(), ClientError> {
    // 1. 履歴の再取得（再接続中に送られたメッセージの補完）
    let history = api.messages(room.id).await?;
    let unseen = unseen_messages(&history, &progress.displayed_ids);
    for message in &unseen {
        print!("{}", MessageFormatter::format_chat_message(message, user.id));
    }
    if is_reconnect {
        print!("{}", MessageFormatter::format_reconnected(unseen.len()));
    }
    progress
        .displayed_ids
        .extend(unseen.iter().map(|message| message.id));

    // 2. WebSocket 接続
    let request = api.websocket_request(user.id)?;
    let (ws_stream, _) = connect_async(request).await.map_err(connect_error)?;
    progress.connected = true;
    tracing::info!("Connected to chat server!");
    redisplay_prompt(&user.username);

    let (mut write, mut read) = ws_stream.split();

    // 3. 送受信
    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    display_frame(text.as_str(), user, room, progress);
                    redisplay_prompt(&user.username);
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                Some(Ok(_)) => {}
            },
            line = input_rx.recv() => match line {
                Some(line) => send_line(&mut write, room.id, line).await?,
                None => {
                    // 入力が終了した（Ctrl+C / Ctrl+D）
                    let _ = write.close().await;
                    return Ok(());
                }
            },
        }
    }
}

async fn send_line(write: &mut WsSink, room_id: i64, line: String) -> Result<(), ClientError> {
    let frame = ChatFrame {
        room_id,
        message: line,
    };
    let json = match serde_json::to_string(&frame) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize message: {}", e);
            return Ok(());
        }
    };

    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send message: {}", e);
        ClientError::ConnectionError(e.to_string())
    })
}

/// Print a pushed message unless it belongs to another room or was already shown
fn display_frame(text: &str, user: &UserDto, room: &RoomDto, progress: &mut SessionProgress) {
    let Ok(message) = serde_json::from_str::<MessageDto>(text) else {
        print!("{}", MessageFormatter::format_raw_message(text));
        return;
    };

    if message.room_id != room.id {
        tracing::debug!("Ignoring message {} of room {}", message.id, message.room_id);
        return;
    }
    if !progress.displayed_ids.insert(message.id) {
        return;
    }

    print!("{}", MessageFormatter::format_chat_message(&message, user.id));
}

fn connect_error(error: tungstenite::Error) -> ClientError {
    match &error {
        tungstenite::Error::Http(response) if response.status() == StatusCode::UNAUTHORIZED => {
            ClientError::SessionExpired
        }
        _ => ClientError::ConnectionError(error.to_string()),
    }
}

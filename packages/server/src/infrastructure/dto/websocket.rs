//! WebSocket frame DTOs.
//!
//! Inbound frames are `{"roomId": number, "message": string}`.
//! Outbound frames are the persisted message, see [`MessageDto`].

use serde::Deserialize;

pub use super::http::MessageDto as OutboundChatFrame;

/// Chat frame sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundChatFrame {
    pub room_id: i64,
    pub message: String,
}

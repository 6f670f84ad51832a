//! Axum handlers.

mod auth;
mod chat;
mod health;
mod websocket;

pub use auth::{current_user, list_users, login, logout, register};
pub use chat::{
    create_room, ensure_support_room, get_room_detail, get_rooms, get_support_room,
    get_unread_count, list_messages, send_message,
};
pub use health::health_check;
pub use websocket::websocket_handler;

//! UseCase layer.
//!
//! 1 ユースケース = 1 構造体。依存は `Arc<dyn Trait>` で受け取り、
//! `execute` で実行する。

mod access;
mod credential;
pub mod error;
#[cfg(test)]
pub(crate) mod test_support;

// chat
pub mod create_room;
pub mod ensure_support_room;
pub mod get_room_detail;
pub mod get_rooms;
pub mod get_support_room;
pub mod get_unread_count;
pub mod list_messages;
pub mod send_message;

// realtime
pub mod connect_participant;
pub mod disconnect_participant;
pub mod fan_out_message;

// auth
pub mod authenticate;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod purge_expired_sessions;
pub mod register_user;
pub mod seed_admin;
pub mod start_session;

pub use error::{AuthError, ChatError};

pub use create_room::CreateRoomUseCase;
pub use ensure_support_room::{EnsureSupportRoomUseCase, EnsuredRoom};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use get_support_room::GetSupportRoomUseCase;
pub use get_unread_count::GetUnreadCountUseCase;
pub use list_messages::ListMessagesUseCase;
pub use send_message::SendMessageUseCase;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use fan_out_message::FanOutMessageUseCase;

pub use authenticate::AuthenticateUseCase;
pub use list_users::ListUsersUseCase;
pub use login::LoginUseCase;
pub use logout::LogoutUseCase;
pub use purge_expired_sessions::PurgeExpiredSessionsUseCase;
pub use register_user::{RegisterUserUseCase, Registration};
pub use seed_admin::SeedAdminUseCase;
pub use start_session::StartSessionUseCase;

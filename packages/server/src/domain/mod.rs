//! Domain layer for the support chat.
//!
//! This module contains business rules that are independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod credential;
pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use credential::CredentialHasher;
pub use entity::{Actor, ChatMessage, ChatParticipant, ChatRoom, NewUser, Session, User};
pub use error::{CredentialError, MessagePushError, RepositoryError, ValueObjectError};
pub use factory::{ConnectionIdFactory, SessionTokenFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ChatRepository, SessionRepository, UserRepository};
pub use value_object::{
    ConnectionId, Email, FullName, MessageContent, MessageId, ParticipantId, RawPassword, RoomId,
    RoomKind, RoomName, SessionToken, Timestamp, UserId, Username,
};

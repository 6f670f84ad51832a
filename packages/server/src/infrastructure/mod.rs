//! Infrastructure layer: persistence, password hashing, live delivery and DTOs.

pub mod dto;
pub mod message_pusher;
pub mod password;
pub mod repository;

//! Repository 実装
//!
//! ## 実装
//!
//! - `sqlite`: sqlx + SQLite を使った永続化実装

pub mod sqlite;

pub use sqlite::{SqliteChatRepository, SqliteSessionRepository, SqliteUserRepository};

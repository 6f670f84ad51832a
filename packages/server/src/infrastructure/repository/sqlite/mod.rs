//! SQLite で永続化する Repository 実装
//!
//! ## 変換の流れ
//!
//! DB Row（`row` モジュール）→ Domain Model
//!
//! Row から Domain Model への変換時に値オブジェクトの検証を行い、
//! 不正なデータは `RepositoryError::Corrupted` として扱う。

pub mod chat;
pub mod pool;
pub mod row;
pub mod session;
pub mod user;

pub use chat::SqliteChatRepository;
pub use pool::{connect_pool, run_migrations};
pub use session::SqliteSessionRepository;
pub use user::SqliteUserRepository;

use crate::domain::RepositoryError;

/// sqlx のエラーを Repository エラーに変換する
pub(crate) fn map_sqlx_error(error: sqlx::Error) -> RepositoryError {
    match &error {
        sqlx::Error::RowNotFound => RepositoryError::NotFound(error.to_string()),
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            RepositoryError::Conflict(db_error.message().to_string())
        }
        _ => RepositoryError::Storage(error.to_string()),
    }
}

//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{CredentialError, MessagePushError, RepositoryError, ValueObjectError};

/// チャット（ルーム・メッセージ）のユースケースのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// 指定されたルームが存在しない
    #[error("Chat room not found")]
    RoomNotFound,

    /// 参加者でも管理者でもない
    #[error("Access denied")]
    AccessDenied,

    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error("message push failed: {0}")]
    Push(#[from] MessagePushError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 認証・ユーザー管理のユースケースのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Admin access required")]
    Forbidden,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// ブロッキングタスク（パスワードハッシュ）が異常終了した
    #[error("background task failed: {0}")]
    TaskFailed(String),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

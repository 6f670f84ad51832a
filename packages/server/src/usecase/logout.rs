//! UseCase: ログアウト

use std::sync::Arc;

use crate::domain::{SessionRepository, SessionToken};

use super::error::AuthError;

/// ログアウトのユースケース
pub struct LogoutUseCase {
    session_repository: Arc<dyn SessionRepository>,
}

impl LogoutUseCase {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    /// セッションを削除する。存在しないトークンでもエラーにしない
    pub async fn execute(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.session_repository.delete(token).await?;
        Ok(())
    }
}

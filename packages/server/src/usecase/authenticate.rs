//! UseCase: セッショントークンからのユーザー解決

use std::sync::Arc;

use sellgadgetz_shared::time::Clock;

use crate::domain::{SessionRepository, SessionToken, Timestamp, User, UserRepository};

use super::error::AuthError;

/// 認証（セッション → ユーザー）のユースケース
pub struct AuthenticateUseCase {
    session_repository: Arc<dyn SessionRepository>,
    user_repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl AuthenticateUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        user_repository: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session_repository,
            user_repository,
            clock,
        }
    }

    /// 有効なセッションに紐づくユーザーを返す
    ///
    /// 期限切れ・不明なトークン、削除済みユーザーはすべて `Unauthenticated`。
    pub async fn execute(&self, token: &SessionToken) -> Result<User, AuthError> {
        let now = Timestamp::new(self.clock.now_millis());
        let session = self
            .session_repository
            .find_valid(token, now)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        self.user_repository
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }
}

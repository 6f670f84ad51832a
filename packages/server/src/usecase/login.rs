//! UseCase: ログイン

use std::sync::Arc;

use crate::domain::{CredentialHasher, RawPassword, Session, User, UserRepository, Username};

use super::{credential::verify_password, error::AuthError, start_session::StartSessionUseCase};

/// ログインのユースケース
pub struct LoginUseCase {
    user_repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    start_session: Arc<StartSessionUseCase>,
}

impl LoginUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        start_session: Arc<StartSessionUseCase>,
    ) -> Self {
        Self {
            user_repository,
            hasher,
            start_session,
        }
    }

    /// 資格情報を検証し、新しいセッションを開始する
    ///
    /// ユーザーが存在しない場合とパスワードが違う場合は区別しない。
    pub async fn execute(
        &self,
        username: String,
        password: String,
    ) -> Result<(User, Session), AuthError> {
        let (Ok(username), Ok(password)) = (Username::new(username), RawPassword::new(password))
        else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = self
            .user_repository
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&self.hasher, &password, &user.password_hash).await? {
            tracing::info!("Failed login attempt for '{}'", username);
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.start_session.execute(user.id).await?;
        tracing::info!("User {} '{}' logged in", user.id, user.username);
        Ok((user, session))
    }
}

//! UseCase: 初期管理者アカウントの作成

use std::sync::Arc;

use crate::domain::{User, UserRepository};

use super::{
    error::AuthError,
    register_user::{RegisterUserUseCase, Registration},
};

/// 初期管理者作成のユースケース
pub struct SeedAdminUseCase {
    user_repository: Arc<dyn UserRepository>,
    register_user: Arc<RegisterUserUseCase>,
}

impl SeedAdminUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        register_user: Arc<RegisterUserUseCase>,
    ) -> Self {
        Self {
            user_repository,
            register_user,
        }
    }

    /// 同名のユーザーがいなければ管理者として作成する
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - 作成した
    /// * `Ok(None)` - 既に存在していた
    pub async fn execute(&self, admin: Registration) -> Result<Option<User>, AuthError> {
        if self
            .user_repository
            .find_by_username(&admin.username)
            .await?
            .is_some()
        {
            tracing::debug!("Administrator '{}' already exists", admin.username);
            return Ok(None);
        }

        let user = self.register_user.create_user(admin, true).await?;
        tracing::info!("Seeded administrator {} '{}'", user.id, user.username);
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::{
        register_user::tests::{cheap_hasher, registration},
        test_support::TestContext,
    };

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        // テスト項目: 初期管理者は 1 回だけ作成される
        // given (前提条件):
        let ctx = TestContext::new().await;
        let register = Arc::new(RegisterUserUseCase::new(
            ctx.user_repository.clone(),
            cheap_hasher(),
            ctx.clock.clone(),
        ));
        let usecase = SeedAdminUseCase::new(ctx.user_repository.clone(), register);

        // when (操作):
        let first = usecase
            .execute(registration("admin", "admin@sellgadgetz.com", "admin123"))
            .await
            .unwrap();
        let second = usecase
            .execute(registration("admin", "admin@sellgadgetz.com", "admin123"))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(first.is_some_and(|user| user.is_admin));
        assert_eq!(second, None);
    }
}

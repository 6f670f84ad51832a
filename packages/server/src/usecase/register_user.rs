//! UseCase: ユーザー登録
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterUserUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - ユーザー名・メールアドレスの重複はそれぞれ別のメッセージで 400 を返す
//! - パスワードは平文で保存してはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規登録
//! - 異常系：ユーザー名の重複、メールアドレスの重複

use std::sync::Arc;

use sellgadgetz_shared::time::Clock;

use crate::domain::{
    CredentialHasher, Email, FullName, NewUser, RawPassword, RepositoryError, Timestamp, User,
    UserRepository, Username,
};

use super::{credential::hash_password, error::AuthError};

/// 登録フォームの内容（検証済み）
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: Username,
    pub email: Email,
    pub password: RawPassword,
    pub full_name: FullName,
    pub phone: Option<String>,
}

/// ユーザー登録のユースケース
pub struct RegisterUserUseCase {
    user_repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    clock: Arc<dyn Clock>,
}

impl RegisterUserUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            hasher,
            clock,
        }
    }

    /// 一般ユーザーとして登録する
    pub async fn execute(&self, registration: Registration) -> Result<User, AuthError> {
        self.create_user(registration, false).await
    }

    /// 管理者フラグを指定して登録する（初期管理者の作成に使用）
    pub(crate) async fn create_user(
        &self,
        registration: Registration,
        is_admin: bool,
    ) -> Result<User, AuthError> {
        // 1. 重複チェック
        if self
            .user_repository
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameTaken);
        }
        if self
            .user_repository
            .find_by_email(registration.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailTaken);
        }

        // 2. パスワードのハッシュ化
        let password_hash = hash_password(&self.hasher, &registration.password).await?;

        // 3. 保存（チェック後に競合した場合も一意制約で弾かれる）
        let phone = registration
            .phone
            .map(|phone| phone.trim().to_string())
            .filter(|phone| !phone.is_empty());
        let new_user = NewUser {
            username: registration.username,
            email: registration.email,
            full_name: registration.full_name,
            phone,
            password_hash,
            is_admin,
        };
        let created_at = Timestamp::new(self.clock.now_millis());
        let user = self
            .user_repository
            .create(new_user, created_at)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        tracing::info!("Registered user {} '{}'", user.id, user.username);
        Ok(user)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infrastructure::password::Argon2CredentialHasher;
    use crate::usecase::test_support::TestContext;

    pub(crate) fn cheap_hasher() -> Arc<dyn CredentialHasher> {
        Arc::new(Argon2CredentialHasher::with_cost(1024, 1, 1).unwrap())
    }

    pub(crate) fn registration(username: &str, email: &str, password: &str) -> Registration {
        Registration {
            username: Username::new(username.to_string()).unwrap(),
            email: Email::new(email.to_string()).unwrap(),
            password: RawPassword::new(password.to_string()).unwrap(),
            full_name: FullName::new("Test User".to_string()).unwrap(),
            phone: Some("  ".to_string()),
        }
    }

    fn create_usecase(ctx: &TestContext) -> RegisterUserUseCase {
        RegisterUserUseCase::new(ctx.user_repository.clone(), cheap_hasher(), ctx.clock.clone())
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        // テスト項目: 登録したユーザーのパスワードはハッシュ化されて保存される
        // given (前提条件):
        let ctx = TestContext::new().await;
        let usecase = create_usecase(&ctx);

        // when (操作):
        let user = usecase
            .execute(registration("alice", "alice@example.com", "s3cret"))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(!user.is_admin);
        assert_ne!(user.password_hash, "s3cret");
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_eq!(user.phone, None);
        assert_eq!(
            ctx.user_repository.find_by_id(user.id).await.unwrap(),
            Some(user)
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email() {
        // テスト項目: ユーザー名・メールアドレスの重複はそれぞれ別のエラーになる
        // given (前提条件):
        let ctx = TestContext::new().await;
        let usecase = create_usecase(&ctx);
        usecase
            .execute(registration("alice", "alice@example.com", "pw"))
            .await
            .unwrap();

        // when (操作):
        let same_username = usecase
            .execute(registration("alice", "other@example.com", "pw"))
            .await;
        let same_email = usecase
            .execute(registration("alice2", "alice@example.com", "pw"))
            .await;

        // then (期待する結果):
        assert_eq!(same_username, Err(AuthError::UsernameTaken));
        assert_eq!(same_email, Err(AuthError::EmailTaken));
    }
}

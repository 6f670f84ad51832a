//! UseCase: ユーザー一覧（管理者のみ）

use std::sync::Arc;

use crate::domain::{Actor, User, UserRepository};

use super::error::AuthError;

pub struct ListUsersUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl ListUsersUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn execute(&self, actor: Actor) -> Result<Vec<User>, AuthError> {
        if !actor.is_admin {
            return Err(AuthError::Forbidden);
        }
        Ok(self.user_repository.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::TestContext;

    #[tokio::test]
    async fn test_only_admins_can_list_users() {
        // テスト項目: ユーザー一覧は管理者のみ取得できる
        // given (前提条件):
        let ctx = TestContext::new().await;
        let admin = ctx.admin("admin").await;
        let alice = ctx.user("alice").await;
        let usecase = ListUsersUseCase::new(ctx.user_repository.clone());

        // when (操作):
        let as_admin = usecase.execute(admin.actor()).await;
        let as_user = usecase.execute(alice.actor()).await;

        // then (期待する結果):
        assert_eq!(as_admin.map(|users| users.len()), Ok(2));
        assert_eq!(as_user, Err(AuthError::Forbidden));
    }
}

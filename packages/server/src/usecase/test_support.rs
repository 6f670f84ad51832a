//! UseCase テスト用のヘルパー

use std::sync::Arc;

use sellgadgetz_shared::time::FixedClock;
use sqlx::SqlitePool;

use crate::{
    domain::User,
    infrastructure::repository::{
        SqliteChatRepository, SqliteSessionRepository, SqliteUserRepository,
        sqlite::test_support::{create_test_pool, create_test_user},
    },
};

/// テストで固定する現在時刻（2023-11-14T22:13:20Z）
pub const NOW: i64 = 1_700_000_000_000;

/// インメモリ DB と各 Repository をまとめたテスト用コンテキスト
pub struct TestContext {
    pub pool: SqlitePool,
    pub chat_repository: Arc<SqliteChatRepository>,
    pub user_repository: Arc<SqliteUserRepository>,
    pub session_repository: Arc<SqliteSessionRepository>,
    pub clock: Arc<FixedClock>,
}

impl TestContext {
    pub async fn new() -> Self {
        let pool = create_test_pool().await;
        Self {
            chat_repository: Arc::new(SqliteChatRepository::new(pool.clone())),
            user_repository: Arc::new(SqliteUserRepository::new(pool.clone())),
            session_repository: Arc::new(SqliteSessionRepository::new(pool.clone())),
            clock: Arc::new(FixedClock::new(NOW)),
            pool,
        }
    }

    pub async fn user(&self, username: &str) -> User {
        create_test_user(&self.pool, username, false).await
    }

    pub async fn admin(&self, username: &str) -> User {
        create_test_user(&self.pool, username, true).await
    }
}


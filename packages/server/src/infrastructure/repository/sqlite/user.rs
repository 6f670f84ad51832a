//! SQLite implementation of [`UserRepository`].

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::{NewUser, RepositoryError, Timestamp, User, UserId, UserRepository, Username};

use super::{
    map_sqlx_error,
    row::{UserRow, convert_all},
};

const USER_COLUMNS: &str = "id, username, email, password, full_name, phone, is_admin, created_at";

#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_one_by(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?", USER_COLUMNS, column);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        self.find_one_by("username", username.as_str()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one_by("email", email).await
    }

    async fn create(&self, user: NewUser, created_at: Timestamp) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password, full_name, phone, is_admin, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.full_name.as_str())
        .bind(user.phone.as_deref())
        .bind(user.is_admin)
        .bind(created_at.value())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id = UserId::new(result.last_insert_rowid())
            .map_err(|e| RepositoryError::Corrupted(e.to_string()))?;
        tracing::debug!("Created user {} '{}'", id, user.username);

        Ok(User {
            id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            password_hash: user.password_hash,
            is_admin: user.is_admin,
            created_at,
        })
    }

    async fn find_admins(&self) -> Result<Vec<User>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM users WHERE is_admin = TRUE ORDER BY id ASC",
            USER_COLUMNS
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        convert_all(rows)
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let sql = format!("SELECT {} FROM users ORDER BY id ASC", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        convert_all(rows)
    }
}

//! SQLite implementation of [`SessionRepository`].

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::{RepositoryError, Session, SessionRepository, SessionToken, Timestamp};

use super::{map_sqlx_error, row::SessionRow};

#[derive(Debug, Clone)]
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: Session) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(session.token.as_str())
        .bind(session.user_id.value())
        .bind(session.created_at.value())
        .bind(session.expires_at.value())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn find_valid(
        &self,
        token: &SessionToken,
        now: Timestamp,
    ) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT token, user_id, created_at, expires_at FROM sessions \
             WHERE token = ? AND expires_at > ?",
        )
        .bind(token.as_str())
        .bind(now.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        row.map(Session::try_from).transpose()
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn delete_expired(&self, now: Timestamp) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now.value())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }
}

//! UseCase: ログインセッションの開始

use std::{sync::Arc, time::Duration};

use sellgadgetz_shared::time::Clock;

use crate::domain::{Session, SessionRepository, SessionTokenFactory, Timestamp, UserId};

use super::error::AuthError;

/// セッション開始のユースケース
pub struct StartSessionUseCase {
    session_repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl StartSessionUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            session_repository,
            clock,
            ttl,
        }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<Session, AuthError> {
        let now = Timestamp::new(self.clock.now_millis());
        let ttl_millis = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        let session = Session {
            token: SessionTokenFactory::generate()?,
            user_id,
            created_at: now,
            expires_at: now.add_millis(ttl_millis),
        };
        self.session_repository.create(session.clone()).await?;
        tracing::debug!("Session started for user {}", user_id);
        Ok(session)
    }
}

//! UseCase: 期限切れセッションの削除

use std::sync::Arc;

use sellgadgetz_shared::time::Clock;

use crate::domain::{SessionRepository, Timestamp};

use super::error::AuthError;

pub struct PurgeExpiredSessionsUseCase {
    session_repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl PurgeExpiredSessionsUseCase {
    pub fn new(session_repository: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_repository,
            clock,
        }
    }

    /// 削除した件数を返す
    pub async fn execute(&self) -> Result<u64, AuthError> {
        let now = Timestamp::new(self.clock.now_millis());
        let purged = self.session_repository.delete_expired(now).await?;
        if purged > 0 {
            tracing::info!("Purged {} expired session(s)", purged);
        }
        Ok(purged)
    }
}

//! UseCase: 参加ルーム一覧の取得

use std::sync::Arc;

use crate::domain::{ChatRepository, ChatRoom, UserId};

use super::error::ChatError;

/// 参加ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<Vec<ChatRoom>, ChatError> {
        Ok(self.repository.find_rooms_by_user(user_id).await?)
    }
}

//! ルームへのアクセス可否の判定

use crate::domain::{Actor, ChatRepository, ChatRoom, RoomId};

use super::error::ChatError;

/// ルームを取得し、actor が参加者または管理者であることを確認する
///
/// 存在しないルームは `RoomNotFound`、権限がなければ `AccessDenied`。
pub(crate) async fn authorize_room_access(
    repository: &dyn ChatRepository,
    actor: &Actor,
    room_id: RoomId,
) -> Result<ChatRoom, ChatError> {
    let room = repository
        .find_room(room_id)
        .await?
        .ok_or(ChatError::RoomNotFound)?;

    // 管理者は参加者行がなくてもアクセスできる
    let is_participant = if actor.is_admin {
        false
    } else {
        repository.is_participant(room_id, actor.user_id).await?
    };

    if !actor.can_access_room(is_participant) {
        tracing::debug!("User {} denied access to room {}", actor.user_id, room_id);
        return Err(ChatError::AccessDenied);
    }

    Ok(room)
}

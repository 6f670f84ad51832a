//! Chat room and message endpoints.
//!
//! Every endpoint requires a session. Access to a single room is granted to
//! its participants and to administrators.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    domain::{RoomId, RoomKind, RoomName},
    infrastructure::dto::http::{
        CreateRoomRequest, MessageDto, RoomDto, SendMessageRequest, UnreadCountDto,
    },
    ui::{
        error::ApiError,
        extractor::{ApiJson, ApiPath, AuthUser},
        state::AppState,
    },
    usecase::ChatError,
};

/// ID の形をしていないルームは存在しないルームとして扱う
fn parse_room_id(raw: i64) -> Result<RoomId, ApiError> {
    RoomId::new(raw).map_err(|_| ApiError::from(ChatError::RoomNotFound))
}

/// Rooms the caller participates in
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    let rooms = state.get_rooms_usecase.execute(user.id).await?;
    Ok(Json(rooms.iter().map(RoomDto::from).collect()))
}

pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiPath(room_id): ApiPath<i64>,
) -> Result<Json<RoomDto>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let room = state
        .get_room_detail_usecase
        .execute(user.actor(), room_id)
        .await?;
    Ok(Json(RoomDto::from(&room)))
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateRoomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = RoomName::new(request.name)?;
    let kind = match request.kind.as_deref() {
        Some(kind) => kind.parse::<RoomKind>()?,
        None => RoomKind::default(),
    };

    let room = state
        .create_room_usecase
        .execute(user.actor(), name, kind)
        .await?;
    Ok((StatusCode::CREATED, Json(RoomDto::from(&room))))
}

/// Messages in ascending order. Marks the other participants' messages read.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiPath(room_id): ApiPath<i64>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let messages = state
        .list_messages_usecase
        .execute(user.actor(), room_id)
        .await?;
    Ok(Json(messages.iter().map(MessageDto::from).collect()))
}

/// Persist a message. REST senders are not fanned out; clients refetch.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiPath(room_id): ApiPath<i64>,
    ApiJson(request): ApiJson<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let room_id = parse_room_id(room_id)?;
    let message = state
        .send_message_usecase
        .execute(user.actor(), room_id, request.message)
        .await?;
    Ok((StatusCode::CREATED, Json(MessageDto::from(&message))))
}

pub async fn get_unread_count(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<UnreadCountDto>, ApiError> {
    let count = state.get_unread_count_usecase.execute(user.id).await?;
    Ok(Json(UnreadCountDto { count }))
}

pub async fn get_support_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<RoomDto>, ApiError> {
    match state.get_support_room_usecase.execute(user.id).await? {
        Some(room) => Ok(Json(RoomDto::from(&room))),
        None => Err(ApiError::NotFound("Support room not found".to_string())),
    }
}

/// 200 with the existing support room, 201 when it was just created
pub async fn ensure_support_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let ensured = state.ensure_support_room_usecase.execute(&user).await?;
    let status = if ensured.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(RoomDto::from(ensured.room()))))
}

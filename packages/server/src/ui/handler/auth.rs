//! Account and session endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};

use crate::{
    domain::{Email, FullName, RawPassword, Username},
    infrastructure::dto::http::{LoginRequest, RegisterRequest, UserDto},
    ui::{
        cookie::{removal_cookie, session_cookie, session_token},
        error::ApiError,
        extractor::{ApiJson, AuthUser},
        state::AppState,
    },
    usecase::Registration,
};

/// Register a new account and log it in
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // リクエスト DTO → Domain Model（検証）
    let registration = Registration {
        username: Username::new(request.username)?,
        email: Email::new(request.email)?,
        password: RawPassword::new(request.password)?,
        full_name: FullName::new(request.full_name)?,
        phone: request.phone,
    };

    let user = state.register_user_usecase.execute(registration).await?;
    let session = state.start_session_usecase.execute(user.id).await?;

    Ok((
        StatusCode::CREATED,
        [(
            header::SET_COOKIE,
            session_cookie(&session.token, state.session_ttl),
        )],
        Json(UserDto::from(&user)),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, session) = state
        .login_usecase
        .execute(request.username, request.password)
        .await?;

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&session.token, state.session_ttl),
        )],
        Json(UserDto::from(&user)),
    ))
}

/// Always succeeds, with or without a session
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = session_token(&headers) {
        state.logout_usecase.execute(&token).await?;
    }

    Ok((
        [(header::SET_COOKIE, removal_cookie())],
        Json(serde_json::json!({"message": "Logged out"})),
    ))
}

pub async fn current_user(AuthUser(user): AuthUser) -> Json<UserDto> {
    Json(UserDto::from(&user))
}

/// All users, administrators only
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = state.list_users_usecase.execute(user.actor()).await?;
    Ok(Json(users.iter().map(UserDto::from).collect()))
}

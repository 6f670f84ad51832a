//! Mapping of use case errors to HTTP responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::ValueObjectError,
    infrastructure::dto::http::ErrorResponse,
    usecase::{AuthError, ChatError},
};

/// Error returned by every handler, rendered as `{"error": "..."}`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// 詳細はログにのみ出力する
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!("Request failed: {}", detail);
        ApiError::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::RoomNotFound => ApiError::NotFound(e.to_string()),
            ChatError::AccessDenied => ApiError::Forbidden(e.to_string()),
            ChatError::InvalidInput(inner) => ApiError::BadRequest(inner.to_string()),
            ChatError::Push(_) | ChatError::Repository(_) => ApiError::internal(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials | AuthError::Unauthenticated => {
                ApiError::Unauthorized(e.to_string())
            }
            AuthError::Forbidden => ApiError::Forbidden(e.to_string()),
            AuthError::UsernameTaken | AuthError::EmailTaken => {
                ApiError::BadRequest(e.to_string())
            }
            AuthError::InvalidInput(inner) => ApiError::BadRequest(inner.to_string()),
            AuthError::Credential(_) | AuthError::TaskFailed(_) | AuthError::Repository(_) => {
                ApiError::internal(e)
            }
        }
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(e: ValueObjectError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

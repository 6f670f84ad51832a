//! Request extractors that reject with [`ApiError`].

use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query},
    http::request::Parts,
};

use crate::{domain::User, usecase::AuthError};

use super::{cookie::session_token, error::ApiError, state::AppState};

/// Logged-in user resolved from the session cookie
pub struct AuthUser(pub User);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(AuthError::Unauthenticated)?;
        let user = state.authenticate_usecase.execute(&token).await?;
        Ok(Self(user))
    }
}

/// `axum::Json` with a JSON error body on rejection
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with a JSON error body on rejection
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Query` with a JSON error body on rejection
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

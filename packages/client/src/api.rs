//! REST calls to the chat server.

use std::sync::Arc;

use reqwest::{
    Response, StatusCode, Url,
    cookie::{CookieStore, Jar},
};
use serde::de::DeserializeOwned;
use tokio_tungstenite::tungstenite::{
    client::IntoClientRequest,
    handshake::client::Request,
    http::{HeaderValue, header::COOKIE},
};

use crate::{
    dto::{ErrorResponse, LoginRequest, MessageDto, RoomDto, UserDto},
    error::ClientError,
};

/// HTTP client holding the session cookie
pub struct ApiClient {
    base_url: Url,
    jar: Arc<Jar>,
    http: reqwest::Client,
}

impl ApiClient {
    /// # Arguments
    ///
    /// * `server` - Base URL of the server (e.g., "http://127.0.0.1:8080")
    pub fn new(server: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(server).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", server, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{}: expected http or https",
                server
            )));
        }

        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()?;
        Ok(Self {
            base_url,
            jar,
            http,
        })
    }

    /// Log in and keep the session cookie
    pub async fn login(&self, username: &str, password: &str) -> Result<UserDto, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::InvalidCredentials(error_message(response).await));
        }
        read_json(response).await
    }

    /// Find or create the caller's support room
    pub async fn ensure_support_room(&self) -> Result<RoomDto, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/chat/support"))
            .send()
            .await?;
        read_json(response).await
    }

    /// Room history in ascending order (marks other participants' messages read)
    pub async fn messages(&self, room_id: i64) -> Result<Vec<MessageDto>, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/chat/rooms/{}/messages", room_id)))
            .send()
            .await?;
        read_json(response).await
    }

    /// WebSocket handshake request carrying the session cookie
    pub fn websocket_request(&self, user_id: i64) -> Result<Request, ClientError> {
        let url = websocket_url(&self.base_url, user_id)?;
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

        if let Some(cookie) = self.jar.cookies(&self.base_url) {
            let value = cookie
                .to_str()
                .ok()
                .and_then(|cookie| HeaderValue::from_str(cookie).ok())
                .ok_or(ClientError::SessionExpired)?;
            request.headers_mut().insert(COOKIE, value);
        }
        Ok(request)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

/// `http(s)://host/...` → `ws(s)://host/api/ws?userId=<id>`
pub fn websocket_url(base_url: &Url, user_id: i64) -> Result<Url, ClientError> {
    let scheme = match base_url.scheme() {
        "https" => "wss",
        _ => "ws",
    };
    let mut url = base_url.clone();
    url.set_scheme(scheme)
        .map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
    url.set_path("/api/ws");
    url.set_query(Some(&format!("userId={}", user_id)));
    Ok(url)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::SessionExpired);
    }
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(response).await,
        });
    }
    Ok(response.json::<T>().await?)
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    }
}

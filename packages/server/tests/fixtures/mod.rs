//! In-process server fixture for the integration tests.
#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use reqwest::{
    Response, StatusCode,
    cookie::{CookieStore, Jar},
};
use sellgadgetz_server::{
    domain::{Email, FullName, MessagePusher, RawPassword, UserId, Username},
    infrastructure::{
        dto::http::UserDto,
        message_pusher::WebSocketMessagePusher,
        password::Argon2CredentialHasher,
        repository::{
            SqliteChatRepository, SqliteSessionRepository, SqliteUserRepository,
            sqlite::{connect_pool, run_migrations},
        },
    },
    ui::{AppState, Dependencies, Server},
    usecase::Registration,
};
use sellgadgetz_shared::time::SystemClock;
use serde_json::{Value, json};
use tokio::{net::TcpStream, sync::oneshot, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream,
    tungstenite::{
        self, Message,
        client::IntoClientRequest,
        http::{HeaderValue, header::COOKIE},
    },
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const PASSWORD: &str = "correct horse battery";

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Server running on an ephemeral port with a fresh in-memory database
pub struct TestServer {
    pub base_url: String,
    pub ws_url: String,
    pub state: Arc<AppState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let pool = connect_pool("sqlite::memory:", 1)
            .await
            .expect("Failed to open database");
        run_migrations(&pool).await.expect("Failed to migrate");

        let state = Arc::new(AppState::new(Dependencies {
            chat_repository: Arc::new(SqliteChatRepository::new(pool.clone())),
            user_repository: Arc::new(SqliteUserRepository::new(pool.clone())),
            session_repository: Arc::new(SqliteSessionRepository::new(pool)),
            message_pusher: Arc::new(WebSocketMessagePusher::new()),
            hasher: Arc::new(
                Argon2CredentialHasher::with_cost(1024, 1, 1).expect("Invalid argon2 params"),
            ),
            clock: Arc::new(SystemClock),
            session_ttl: Duration::from_secs(24 * 60 * 60),
        }));
        state
            .seed_admin_usecase
            .execute(Registration {
                username: Username::new(ADMIN_USERNAME.to_string()).unwrap(),
                email: Email::new("admin@sellgadgetz.com".to_string()).unwrap(),
                password: RawPassword::new(ADMIN_PASSWORD.to_string()).unwrap(),
                full_name: FullName::new("Admin User".to_string()).unwrap(),
                phone: None,
            })
            .await
            .expect("Failed to seed admin");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("No local address");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = Server::new(state.clone());
        let handle = tokio::spawn(async move {
            let _ = server
                .serve(listener, async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            base_url: format!("http://{}", addr),
            ws_url: format!("ws://{}/api/ws", addr),
            state,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    /// Client without a session
    pub fn client(&self) -> TestClient {
        TestClient::new(&self.base_url)
    }

    /// Register a new user; the returned client holds its session
    pub async fn register(&self, username: &str) -> (TestClient, UserDto) {
        let client = self.client();
        let response = client
            .post(
                "/api/register",
                json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": PASSWORD,
                    "fullName": format!("{} Tester", username),
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let user = response.json::<UserDto>().await.expect("Invalid user body");
        (client, user)
    }

    /// Log in as the seeded administrator
    pub async fn admin(&self) -> (TestClient, UserDto) {
        let client = self.client();
        let response = client
            .post(
                "/api/login",
                json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let user = response.json::<UserDto>().await.expect("Invalid user body");
        (client, user)
    }

    /// Open a WebSocket with the client's session cookie
    pub async fn connect(&self, client: &TestClient) -> Result<WsStream, tungstenite::Error> {
        self.connect_with_query(client, "").await
    }

    pub async fn connect_with_query(
        &self,
        client: &TestClient,
        query: &str,
    ) -> Result<WsStream, tungstenite::Error> {
        let mut request = format!("{}{}", self.ws_url, query).into_client_request()?;
        if let Some(cookie) = client.cookie_header() {
            request.headers_mut().insert(
                COOKIE,
                HeaderValue::from_str(&cookie).expect("Invalid cookie header"),
            );
        }
        let (stream, _) = tokio_tungstenite::connect_async(request).await?;
        Ok(stream)
    }

    /// Wait until the registry holds `expected` open connections of the user
    ///
    /// Registration happens after the upgrade, so a client can be connected
    /// before the server side has registered it.
    pub async fn wait_for_connections(&self, user_id: i64, expected: usize) {
        let user_id = UserId::new(user_id).unwrap();
        for _ in 0..100 {
            if self.state.message_pusher.connection_count(user_id).await == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("User {} never reached {} connection(s)", user_id, expected);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle.abort();
    }
}

/// REST client with its own cookie jar
pub struct TestClient {
    base_url: String,
    jar: Arc<Jar>,
    http: reqwest::Client,
}

impl TestClient {
    fn new(base_url: &str) -> Self {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()
            .expect("Failed to build HTTP client");
        Self {
            base_url: base_url.to_string(),
            jar,
            http,
        }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET failed")
    }

    pub async fn post(&self, path: &str, body: Value) -> Response {
        self.http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .expect("POST failed")
    }

    /// POST with a raw (possibly invalid) JSON body
    pub async fn post_raw(&self, path: &str, body: &'static str) -> Response {
        self.http
            .post(format!("{}{}", self.base_url, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("POST failed")
    }

    /// `Cookie` header value the jar would send to the server
    pub fn cookie_header(&self) -> Option<String> {
        let url = self.base_url.parse().expect("Invalid base url");
        self.jar
            .cookies(&url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }
}

/// Read the next text frame as JSON
pub async fn next_json(stream: &mut WsStream) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Stream ended")
            .expect("WebSocket error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
        }
    }
}

/// Assert that no text frame arrives within a short window
pub async fn assert_silent(stream: &mut WsStream) {
    let result = tokio::time::timeout(Duration::from_millis(300), stream.next()).await;
    if let Ok(Some(Ok(Message::Text(text)))) = result {
        panic!("Unexpected frame: {}", text.as_str());
    }
}

pub async fn send_frame(stream: &mut WsStream, frame: Value) {
    stream
        .send(Message::Text(frame.to_string().into()))
        .await
        .expect("Failed to send frame");
}

pub async fn send_raw(stream: &mut WsStream, text: &str) {
    stream
        .send(Message::Text(text.to_string().into()))
        .await
        .expect("Failed to send frame");
}

//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        create_room, current_user, ensure_support_room, get_room_detail, get_rooms,
        get_support_room, get_unread_count, health_check, list_messages, list_users, login,
        logout, register, send_message, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// 期限切れセッションを削除する間隔
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Support chat server
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(AppState::new(dependencies));
/// Server::new(state).run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/api/ws", get(websocket_handler))
            // 認証
            .route("/api/register", post(register))
            .route("/api/login", post(login))
            .route("/api/logout", post(logout))
            .route("/api/user", get(current_user))
            .route("/api/users", get(list_users))
            // チャット
            .route("/api/chat/rooms", get(get_rooms).post(create_room))
            .route("/api/chat/rooms/{room_id}", get(get_room_detail))
            .route(
                "/api/chat/rooms/{room_id}/messages",
                get(list_messages).post(send_message),
            )
            .route("/api/chat/unread", get(get_unread_count))
            .route(
                "/api/chat/support",
                get(get_support_room).post(ensure_support_room),
            )
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// After axum stops accepting requests the connection registry is closed,
    /// which ends every open WebSocket.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let purge_task = self.spawn_session_purge();

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        purge_task.abort();
        self.state.message_pusher.close_all().await;
        result
    }

    /// Bind to `host:port` and serve until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Support chat server listening on {}", listener.local_addr()?);
        tracing::info!("WebSocket endpoint: ws://{}/api/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    fn spawn_session_purge(&self) -> tokio::task::JoinHandle<()> {
        let usecase = self.state.purge_expired_sessions_usecase.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
            loop {
                interval.tick().await;
                if let Err(e) = usecase.execute().await {
                    tracing::warn!("Failed to purge expired sessions: {}", e);
                }
            }
        })
    }
}

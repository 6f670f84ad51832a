//! SellGadgetz support chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sellgadgetz-server
//! cargo run --bin sellgadgetz-server -- --host 0.0.0.0 --port 3000 --database-url sqlite::memory:
//! ```

use std::sync::Arc;

use clap::Parser;
use sellgadgetz_server::{
    config::ServerArgs,
    domain::{Email, FullName, RawPassword, Username},
    infrastructure::{
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
use sellgadgetz_shared::{logger::setup_logger, time::SystemClock};

const ADMIN_FULL_NAME: &str = "Admin User";

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = run(args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: ServerArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize dependencies in order:
    // 1. Database
    // 2. Repositories
    // 3. MessagePusher
    // 4. AppState (UseCases)
    // 5. Administrator account
    // 6. Server

    // 1. Open the database and apply migrations
    let pool = connect_pool(&args.database_url, args.max_db_connections).await?;
    run_migrations(&pool).await?;
    tracing::info!("Database ready at {}", args.database_url);

    // 2. Create Repositories (SQLite)
    let chat_repository = Arc::new(SqliteChatRepository::new(pool.clone()));
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let session_repository = Arc::new(SqliteSessionRepository::new(pool));

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 4. Create UseCases
    let state = Arc::new(AppState::new(Dependencies {
        chat_repository,
        user_repository,
        session_repository,
        message_pusher,
        hasher: Arc::new(Argon2CredentialHasher::new()),
        clock: Arc::new(SystemClock),
        session_ttl: args.session_ttl(),
    }));

    // 5. Seed the administrator
    if args.uses_default_admin_password() {
        tracing::warn!(
            "Administrator '{}' uses the default password, set SELLGADGETZ_ADMIN_PASSWORD",
            args.admin_username
        );
    }
    let admin = Registration {
        username: Username::new(args.admin_username.clone())?,
        email: Email::new(args.admin_email.clone())?,
        password: RawPassword::new(args.admin_password.clone())?,
        full_name: FullName::new(ADMIN_FULL_NAME.to_string())?,
        phone: None,
    };
    state.seed_admin_usecase.execute(admin).await?;

    // 6. Run the server
    Server::new(state).run(args.host, args.port).await
}

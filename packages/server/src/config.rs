//! Command line / environment configuration of the server.

use std::time::Duration;

use clap::Parser;

/// Password the administrator is seeded with when none is configured
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Parser, Debug, Clone)]
#[command(name = "sellgadgetz-server")]
#[command(about = "SellGadgetz support chat server", long_about = None)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "SELLGADGETZ_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "SELLGADGETZ_PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite connection string (`sqlite::memory:` for a throwaway database)
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://sellgadgetz.db?mode=rwc"
    )]
    pub database_url: String,

    #[arg(long, default_value_t = 5)]
    pub max_db_connections: u32,

    /// Lifetime of a login session
    #[arg(long, default_value_t = 24)]
    pub session_ttl_hours: u64,

    /// Username of the administrator created on first start
    #[arg(long, env = "SELLGADGETZ_ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    #[arg(
        long,
        env = "SELLGADGETZ_ADMIN_PASSWORD",
        default_value = DEFAULT_ADMIN_PASSWORD,
        hide_env_values = true
    )]
    pub admin_password: String,

    #[arg(long, default_value = "admin@sellgadgetz.com")]
    pub admin_email: String,

    /// Default log level, overridden by `RUST_LOG`
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

impl ServerArgs {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_hours.saturating_mul(60 * 60))
    }

    pub fn uses_default_admin_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

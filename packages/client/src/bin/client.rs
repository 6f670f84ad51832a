//! SellGadgetz support chat client.
//!
//! Logs in, opens the caller's support room and prints its history, then
//! sends every typed line as a chat message. Automatically reconnects on
//! disconnection (max 5 attempts with 5 second interval) and refetches the
//! history to show messages missed in between.
//!
//! Run with:
//! ```not_rust
//! SELLGADGETZ_PASSWORD=secret cargo run --bin sellgadgetz-client -- --username alice
//! ```

use clap::Parser;

use sellgadgetz_client::{ClientConfig, run_client};
use sellgadgetz_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sellgadgetz-client")]
#[command(about = "Terminal client for the SellGadgetz support chat", long_about = None)]
struct Args {
    /// Base URL of the chat server
    #[arg(short = 's', long, default_value = "http://127.0.0.1:8080")]
    server: String,

    #[arg(short = 'u', long)]
    username: String,

    #[arg(long, env = "SELLGADGETZ_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    let config = ClientConfig {
        server: args.server,
        username: args.username,
        password: args.password,
    };
    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

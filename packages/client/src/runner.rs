//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::{
    api::ApiClient,
    domain::{
        SessionProgress, reconnect_attempts_after_drop, should_attempt_reconnect,
        should_exit_immediately,
    },
    error::ClientError,
    formatter::MessageFormatter,
    session::run_client_session,
    ui::prompt,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Connection settings of the client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "http://127.0.0.1:8080")
    pub server: String,
    pub username: String,
    pub password: String,
}

/// Run the chat client with reconnection logic
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let api = ApiClient::new(&config.server)?;
    let user = api.login(&config.username, &config.password).await?;
    tracing::info!("Logged in as '{}' (#{})", user.username, user.id);

    let room = api.ensure_support_room().await?;
    print!(
        "{}",
        MessageFormatter::format_room_header(&room, &user.username)
    );

    let mut input_rx = spawn_input_thread(prompt(&user.username));
    let mut progress = SessionProgress::default();
    let mut reconnect_count = 0;
    let mut is_reconnect = false;

    loop {
        progress.connected = false;
        match run_client_session(
            &api,
            &user,
            &room,
            &mut input_rx,
            &mut progress,
            is_reconnect,
        )
        .await
        {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If the session ended normally (user exit), don't reconnect
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    return Err(e);
                }
                reconnect_count =
                    reconnect_attempts_after_drop(reconnect_count, progress.connected);
                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;
                is_reconnect = true;
                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;

                if matches!(e, ClientError::SessionExpired)
                    && let Err(login_error) = api.login(&config.username, &config.password).await
                {
                    tracing::warn!("Failed to log in again: {}", login_error);
                }
            }
        }
    }

    Ok(())
}

/// Spawn a blocking thread for rustyline (synchronous readline)
///
/// The channel closes when the user presses Ctrl+C or Ctrl+D.
fn spawn_input_thread(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

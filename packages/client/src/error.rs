//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the username / password
    #[error("Login failed: {0}")]
    InvalidCredentials(String),

    /// The session is no longer valid; logging in again may help
    #[error("Session expired")]
    SessionExpired,

    /// Any other non-success response of the REST API
    #[error("Server responded {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

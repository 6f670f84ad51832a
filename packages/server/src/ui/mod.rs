//! HTTP / WebSocket surface of the chat server.

mod cookie;
mod error;
mod extractor;
mod handler;
mod server;
mod signal;
pub mod state;

pub use error::ApiError;
pub use server::Server;
pub use state::{AppState, Dependencies};

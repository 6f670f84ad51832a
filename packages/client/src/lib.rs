//! Terminal client for the SellGadgetz support chat.
//!
//! Logs in, opens the caller's support room, prints its history and then
//! relays typed lines over a WebSocket.

pub mod api;
pub mod domain;
pub mod dto;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;

pub use runner::{ClientConfig, run_client};

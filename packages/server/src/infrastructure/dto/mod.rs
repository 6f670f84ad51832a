//! Data Transfer Objects (DTOs) for the chat server.
//!
//! DTOs are organized by protocol:
//! - `http`: REST request / response bodies
//! - `websocket`: WebSocket frames
//!
//! Field names are camelCase on the wire.

pub mod conversion;
pub mod http;
pub mod websocket;

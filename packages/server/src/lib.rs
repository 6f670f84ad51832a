//! SellGadgetz support chat server library.
//!
//! Rooms, participants, unread counts and WebSocket fan-out, served over
//! a cookie-authenticated REST API.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;

//! Utilities shared by the SellGadgetz chat server and client.

pub mod logger;
pub mod time;

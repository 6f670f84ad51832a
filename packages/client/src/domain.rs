//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use std::collections::HashSet;

use crate::{dto::MessageDto, error::ClientError};

/// What the client has observed so far, kept across reconnects
#[derive(Debug, Default)]
pub struct SessionProgress {
    /// Ids of the messages already printed
    pub displayed_ids: HashSet<i64>,
    /// Whether the latest session got as far as an open WebSocket
    pub connected: bool,
}

/// Check if the client should exit immediately based on the error type.
///
/// Rejected credentials and a malformed server URL cannot be fixed by
/// reconnecting.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::InvalidCredentials(_) | ClientError::InvalidUrl(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

/// Reconnect attempts to carry over after a session ends with an error.
///
/// A session that reached an open WebSocket starts a fresh series of attempts.
pub fn reconnect_attempts_after_drop(previous_attempts: u32, was_connected: bool) -> u32 {
    if was_connected { 0 } else { previous_attempts }
}

/// Messages of `history` not shown yet, in history order
///
/// Messages posted over REST are never pushed, so a message older than the
/// newest pushed one can still be missing from the screen.
pub fn unseen_messages<'a>(
    history: &'a [MessageDto],
    displayed_ids: &HashSet<i64>,
) -> Vec<&'a MessageDto> {
    history
        .iter()
        .filter(|message| !displayed_ids.contains(&message.id))
        .collect()
}

//! Message formatting utilities for client display.

use chrono::{DateTime, Utc};

use crate::dto::{MessageDto, RoomDto};

const RULE: &str = "------------------------------------------------------------";
const DOUBLE_RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// `2023-01-01T00:00:00.123Z` → `2023-01-01 00:00:00 UTC`
    ///
    /// Unparseable values are shown as they are.
    pub fn format_time(created_at: &str) -> String {
        DateTime::parse_from_rfc3339(created_at)
            .map(|time| {
                time.with_timezone(&Utc)
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
            })
            .unwrap_or_else(|_| created_at.to_string())
    }

    /// Header printed once the support room is open
    pub fn format_room_header(room: &RoomDto, username: &str) -> String {
        format!(
            "\n\n{}\n{} (#{})\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n{}\n",
            DOUBLE_RULE, room.name, room.id, username, DOUBLE_RULE
        )
    }

    /// Format a chat message
    ///
    /// The author is shown as `you` for the current user and `user#<id>`
    /// otherwise.
    pub fn format_chat_message(message: &MessageDto, current_user_id: i64) -> String {
        let author = if message.user_id == current_user_id {
            "you".to_string()
        } else {
            format!("user#{}", message.user_id)
        };
        format!(
            "\n{}\n@{}: {}\nsent at {}\n{}\n",
            RULE,
            author,
            message.message,
            Self::format_time(&message.created_at),
            RULE
        )
    }

    /// Printed after a reconnect once the history has been refetched
    pub fn format_reconnected(missed: usize) -> String {
        match missed {
            0 => "\n(reconnected, no missed messages)\n".to_string(),
            1 => "\n(reconnected, 1 missed message)\n".to_string(),
            n => format!("\n(reconnected, {} missed messages)\n", n),
        }
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(user_id: i64, text: &str) -> MessageDto {
        MessageDto {
            id: 1,
            room_id: 1,
            user_id,
            message: text.to_string(),
            read: false,
            created_at: "2023-01-01T09:30:15.123Z".to_string(),
        }
    }

    #[test]
    fn test_format_time() {
        // テスト項目: RFC 3339 の時刻が UTC の読みやすい形式になる
        // given (前提条件):
        let created_at = "2023-01-01T09:30:15.123Z";

        // when (操作):
        let result = MessageFormatter::format_time(created_at);

        // then (期待する結果):
        assert_eq!(result, "2023-01-01 09:30:15 UTC");
        assert_eq!(MessageFormatter::format_time("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_room_header() {
        // テスト項目: ルーム名・ID・ユーザー名がヘッダーに含まれる
        // given (前提条件):
        let room = RoomDto {
            id: 4,
            name: "Support: alice".to_string(),
            kind: "support".to_string(),
            created_at: "2023-01-01T00:00:00.000Z".to_string(),
        };

        // when (操作):
        let result = MessageFormatter::format_room_header(&room, "alice");

        // then (期待する結果):
        assert!(result.contains("Support: alice (#4)"));
        assert!(result.contains("You are 'alice'"));
        assert!(result.contains(DOUBLE_RULE));
    }

    #[test]
    fn test_format_own_chat_message() {
        // テスト項目: 自分のメッセージは @you として表示される
        // given (前提条件):
        let message = message(7, "Hello, world!");

        // when (操作):
        let result = MessageFormatter::format_chat_message(&message, 7);

        // then (期待する結果):
        assert!(result.contains("@you: Hello, world!"));
        assert!(result.contains("sent at 2023-01-01 09:30:15 UTC"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_other_chat_message() {
        // テスト項目: 他人のメッセージはユーザー ID 付きで表示される
        // given (前提条件):
        let message = message(1, "How can we help?");

        // when (操作):
        let result = MessageFormatter::format_chat_message(&message, 7);

        // then (期待する結果):
        assert!(result.contains("@user#1: How can we help?"));
    }

    #[test]
    fn test_format_reconnected() {
        // テスト項目: 取りこぼした件数に応じて再接続メッセージが変わる
        // then (期待する結果):
        assert!(MessageFormatter::format_reconnected(0).contains("no missed messages"));
        assert!(MessageFormatter::format_reconnected(1).contains("1 missed message)"));
        assert!(MessageFormatter::format_reconnected(3).contains("3 missed messages"));
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: 生メッセージが正しくフォーマットされる
        // given (前提条件):
        let text = "unknown message format";

        // when (操作):
        let result = MessageFormatter::format_raw_message(text);

        // then (期待する結果):
        assert!(result.contains("unknown message format"));
        assert!(result.contains("Received:"));
    }
}

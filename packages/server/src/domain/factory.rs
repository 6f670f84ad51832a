//! Factories for generated identifiers.

use uuid::Uuid;

use super::{ConnectionId, SessionToken, ValueObjectError};

/// Session token factory
pub struct SessionTokenFactory;

impl SessionTokenFactory {
    /// Generate a new random session token (UUID v4, simple format).
    pub fn generate() -> Result<SessionToken, ValueObjectError> {
        SessionToken::new(Uuid::new_v4().simple().to_string())
    }
}

/// WebSocket connection id factory
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::new(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_tokens_are_unique() {
        // テスト項目: 生成されるセッショントークンは毎回異なる
        // given (前提条件):

        // when (操作):
        let first = SessionTokenFactory::generate().unwrap();
        let second = SessionTokenFactory::generate().unwrap();

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 32);
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 接続 ID は接続ごとに異なる
        // given (前提条件):

        // when (操作):
        let first = ConnectionIdFactory::generate();
        let second = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}

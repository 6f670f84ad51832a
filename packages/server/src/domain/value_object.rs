//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::ValueObjectError;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new identifier, rejecting zero and negative values.
            pub fn new(id: i64) -> Result<Self, ValueObjectError> {
                if id <= 0 {
                    return Err(ValueObjectError::IdNotPositive {
                        kind: $kind,
                        actual: id,
                    });
                }
                Ok(Self(id))
            }

            /// Get the inner value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValueObjectError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// User identifier.
    UserId,
    "UserId"
);
numeric_id!(
    /// Chat room identifier.
    RoomId,
    "RoomId"
);
numeric_id!(
    /// Chat message identifier.
    MessageId,
    "MessageId"
);
numeric_id!(
    /// Chat participant row identifier.
    ParticipantId,
    "ParticipantId"
);

/// Login name of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    pub const MAX_LENGTH: usize = 50;

    /// Create a new Username. Surrounding whitespace is trimmed.
    pub fn new(username: String) -> Result<Self, ValueObjectError> {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = username.chars().count();
        if len > Self::MAX_LENGTH {
            return Err(ValueObjectError::UsernameTooLong {
                max: Self::MAX_LENGTH,
                actual: len,
            });
        }
        if username.chars().any(char::is_whitespace) {
            return Err(ValueObjectError::UsernameContainsWhitespace);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// E-mail address of a user.
///
/// Only the shape `local@domain` is checked; deliverability is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: String) -> Result<Self, ValueObjectError> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(ValueObjectError::EmailEmpty);
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self(email)),
            _ => Err(ValueObjectError::EmailInvalidFormat(email)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Display name of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullName(String);

impl FullName {
    pub const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValueObjectError::FullNameEmpty);
        }
        let len = name.chars().count();
        if len > Self::MAX_LENGTH {
            return Err(ValueObjectError::FullNameTooLong {
                max: Self::MAX_LENGTH,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Plain-text password as received from a client.
///
/// The value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct RawPassword(String);

impl RawPassword {
    pub fn new(password: String) -> Result<Self, ValueObjectError> {
        if password.is_empty() {
            return Err(ValueObjectError::PasswordEmpty);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword(***)")
    }
}

/// Display name of a chat room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    pub const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = name.chars().count();
        if len > Self::MAX_LENGTH {
            return Err(ValueObjectError::RoomNameTooLong {
                max: Self::MAX_LENGTH,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a chat room.
///
/// `Support` rooms are user-to-staff conversations that every administrator
/// joins automatically. `Direct` rooms only contain the users added to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    #[default]
    Support,
    Direct,
}

impl RoomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomKind::Support => "support",
            RoomKind::Direct => "direct",
        }
    }
}

impl FromStr for RoomKind {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "support" => Ok(RoomKind::Support),
            "direct" => Ok(RoomKind::Direct),
            other => Err(ValueObjectError::RoomKindUnknown(other.to_string())),
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message content value object.
///
/// Represents the text body of a chat message with validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    pub const MAX_LENGTH: usize = 10000;

    /// Create a new MessageContent.
    ///
    /// Whitespace-only text counts as empty. The text itself is stored as sent.
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        if content.trim().is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        let len = content.chars().count();
        if len > Self::MAX_LENGTH {
            return Err(ValueObjectError::MessageContentTooLong {
                max: Self::MAX_LENGTH,
                actual: len,
            });
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Timestamp value object (Unix milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Return a timestamp shifted forward by the given number of milliseconds.
    pub fn add_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

/// Opaque session token handed to the browser in a cookie.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: String) -> Result<Self, ValueObjectError> {
        if token.trim().is_empty() {
            return Err(ValueObjectError::SessionTokenEmpty);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tokens are credentials; only a prefix goes into logs.
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "SessionToken({}…)", prefix)
    }
}

/// Identifier of one live WebSocket connection.
///
/// A user holding several tabs open has one ConnectionId per tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_rejects_non_positive() {
        // テスト項目: 0 以下の ID は生成できない
        // given (前提条件):
        let zero = 0;
        let negative = -3;

        // when (操作):
        let zero_result = RoomId::new(zero);
        let negative_result = UserId::try_from(negative);

        // then (期待する結果):
        assert_eq!(
            zero_result,
            Err(ValueObjectError::IdNotPositive {
                kind: "RoomId",
                actual: 0
            })
        );
        assert!(negative_result.is_err());
        assert_eq!(MessageId::new(42).map(|id| id.value()), Ok(42));
    }

    #[test]
    fn test_username_is_trimmed_and_validated() {
        // テスト項目: ユーザー名は前後の空白が除去され、内部の空白は拒否される
        // given (前提条件):
        let padded = "  alice  ".to_string();

        // when (操作):
        let username = Username::new(padded);

        // then (期待する結果):
        assert_eq!(username.map(Username::into_string), Ok("alice".to_string()));
        assert_eq!(
            Username::new("al ice".to_string()),
            Err(ValueObjectError::UsernameContainsWhitespace)
        );
        assert_eq!(
            Username::new("   ".to_string()),
            Err(ValueObjectError::UsernameEmpty)
        );
    }

    #[test]
    fn test_email_requires_local_and_domain() {
        // テスト項目: メールアドレスには @ の前後が必要
        // given (前提条件):
        let valid = "alice@example.com".to_string();

        // when (操作):
        let result = Email::new(valid);

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(matches!(
            Email::new("alice@".to_string()),
            Err(ValueObjectError::EmailInvalidFormat(_))
        ));
        assert!(matches!(
            Email::new("no-at-sign".to_string()),
            Err(ValueObjectError::EmailInvalidFormat(_))
        ));
    }

    #[test]
    fn test_room_kind_parses_known_values_only() {
        // テスト項目: ルーム種別は support / direct のみ受け付ける
        // given (前提条件):
        let inputs = ["support", "direct", "group"];

        // when (操作):
        let parsed: Vec<_> = inputs.iter().map(|s| s.parse::<RoomKind>()).collect();

        // then (期待する結果):
        assert_eq!(parsed[0], Ok(RoomKind::Support));
        assert_eq!(parsed[1], Ok(RoomKind::Direct));
        assert_eq!(
            parsed[2],
            Err(ValueObjectError::RoomKindUnknown("group".to_string()))
        );
        assert_eq!(RoomKind::default(), RoomKind::Support);
    }

    #[test]
    fn test_room_name_length_limit() {
        // テスト項目: ルーム名は 100 文字まで
        // given (前提条件):
        let max = "a".repeat(RoomName::MAX_LENGTH);
        let over = "a".repeat(RoomName::MAX_LENGTH + 1);

        // when (操作):
        let ok = RoomName::new(max);
        let too_long = RoomName::new(over);

        // then (期待する結果):
        assert!(ok.is_ok());
        assert_eq!(
            too_long,
            Err(ValueObjectError::RoomNameTooLong {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_message_content_rejects_blank() {
        // テスト項目: 空白のみのメッセージは拒否される
        // given (前提条件):
        let blank = " \n\t ".to_string();

        // when (操作):
        let result = MessageContent::new(blank);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::MessageContentEmpty));
    }

    #[test]
    fn test_message_content_counts_characters_not_bytes() {
        // テスト項目: 文字数の上限はバイト数ではなく文字数で判定される
        // given (前提条件):
        let multibyte = "あ".repeat(MessageContent::MAX_LENGTH);

        // when (操作):
        let result = MessageContent::new(multibyte.clone());

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(MessageContent::new(format!("{}あ", multibyte)).is_err());
    }

    #[test]
    fn test_secrets_are_redacted_in_debug_output() {
        // テスト項目: パスワードとセッショントークンは Debug 出力で伏せられる
        // given (前提条件):
        let password = RawPassword::new("hunter2".to_string()).unwrap();
        let token = SessionToken::new("0123456789abcdef".to_string()).unwrap();

        // when (操作):
        let password_debug = format!("{:?}", password);
        let token_debug = format!("{:?}", token);

        // then (期待する結果):
        assert!(!password_debug.contains("hunter2"));
        assert!(token_debug.contains("01234567"));
        assert!(!token_debug.contains("89abcdef"));
    }
}

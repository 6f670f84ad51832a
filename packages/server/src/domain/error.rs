//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Numeric identifiers are generated by the database and always positive
    #[error("{kind} must be a positive integer (got {actual})")]
    IdNotPositive { kind: &'static str, actual: i64 },

    #[error("Username cannot be empty")]
    UsernameEmpty,

    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("Username cannot contain whitespace")]
    UsernameContainsWhitespace,

    #[error("Email cannot be empty")]
    EmailEmpty,

    #[error("Email is not a valid address (got: {0})")]
    EmailInvalidFormat(String),

    #[error("Full name cannot be empty")]
    FullNameEmpty,

    #[error("Full name cannot exceed {max} characters (got {actual})")]
    FullNameTooLong { max: usize, actual: usize },

    #[error("Password cannot be empty")]
    PasswordEmpty,

    #[error("Room name cannot be empty")]
    RoomNameEmpty,

    #[error("Room name cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// Room kinds are a closed set
    #[error("Unknown room type: {0}")]
    RoomKindUnknown(String),

    #[error("Message cannot be empty")]
    MessageContentEmpty,

    #[error("Message cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    #[error("Session token cannot be empty")]
    SessionTokenEmpty,
}

/// Errors reported by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A row that must exist was not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint rejected the write
    #[error("Conflicting record: {0}")]
    Conflict(String),

    /// Stored data could not be converted into a domain model
    #[error("Stored data is invalid: {0}")]
    Corrupted(String),

    /// The storage backend failed
    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Errors reported by [`MessagePusher`](super::MessagePusher) implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

/// Errors reported by [`CredentialHasher`](super::CredentialHasher) implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Failed to hash password: {0}")]
    HashFailed(String),

    /// The stored hash is not a parsable PHC string
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

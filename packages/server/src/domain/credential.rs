//! Password hashing port.

use super::{CredentialError, RawPassword};

/// Hashes and verifies passwords.
///
/// Implementations are CPU-bound and synchronous; async callers should run them
/// on a blocking thread.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash a password into a self-describing (PHC) string.
    fn hash(&self, password: &RawPassword) -> Result<String, CredentialError>;

    /// Check a password against a stored hash.
    ///
    /// A wrong password is `Ok(false)`; only an unreadable hash is an error.
    fn verify(&self, password: &RawPassword, hash: &str) -> Result<bool, CredentialError>;
}

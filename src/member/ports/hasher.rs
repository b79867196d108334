//! Credential hashing port.

use crate::member::domain::PasswordHash;
use thiserror::Error;

/// Turns plaintext passwords into comparable hashes.
///
/// Implementations must be deterministic: hashing the same password twice
/// yields equal [`PasswordHash`] values, since login compares hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when the password is unusable.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;
}

/// Errors returned by password hashers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordHashError {
    /// The password is blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

//! SHA-256 password hasher.

use crate::member::{
    domain::PasswordHash,
    ports::{PasswordHashError, PasswordHasher},
};
use sha2::{Digest, Sha256};

/// Hashes passwords as lowercase hex-encoded SHA-256 digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    /// Creates a hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        if password.trim().is_empty() {
            return Err(PasswordHashError::EmptyPassword);
        }
        let digest = Sha256::digest(password.as_bytes());
        PasswordHash::new(format!("{digest:x}")).map_err(|_| PasswordHashError::EmptyPassword)
    }
}

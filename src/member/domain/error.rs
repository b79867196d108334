//! Error types for member domain validation.

use thiserror::Error;

/// Errors returned while constructing member domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MemberDomainError {
    /// The display name is empty after trimming.
    #[error("member name must not be empty")]
    EmptyName,

    /// The display name exceeds the character limit.
    #[error("member name exceeds {max} characters: {name}")]
    NameTooLong {
        /// Rejected name.
        name: String,
        /// Maximum number of characters.
        max: usize,
    },

    /// The login identifier is empty after trimming.
    #[error("login id must not be empty")]
    EmptyLoginId,

    /// The login identifier contains whitespace.
    #[error("login id '{0}' must not contain whitespace")]
    InvalidLoginId(String),

    /// The email address is empty after trimming.
    #[error("email address must not be empty")]
    EmptyEmail,

    /// The email address does not have a `local@domain` shape.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The plaintext password is empty after trimming.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The stored password hash is empty.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}

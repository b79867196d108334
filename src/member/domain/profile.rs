//! Validated scalar types carried by a member record.

use super::MemberDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum display name length in characters.
const MAX_NAME_CHARS: usize = 10;

/// Member display name, 1 to 10 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberName(String);

impl MemberName {
    /// Creates a validated display name.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::EmptyName`] when the value is blank or
    /// [`MemberDomainError::NameTooLong`] when it exceeds 10 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MemberDomainError::EmptyName);
        }
        if trimmed.chars().count() > MAX_NAME_CHARS {
            return Err(MemberDomainError::NameTooLong {
                name: raw,
                max: MAX_NAME_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique login identifier chosen at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginId(String);

impl LoginId {
    /// Creates a validated login identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::EmptyLoginId`] when the value is blank or
    /// [`MemberDomainError::InvalidLoginId`] when it contains inner
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MemberDomainError::EmptyLoginId);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(MemberDomainError::InvalidLoginId(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the login identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LoginId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact email address in `local@domain` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Only the overall shape is checked: a single `@`, a non-empty local
    /// part, and a dotted domain without whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::EmptyEmail`] when the value is blank or
    /// [`MemberDomainError::InvalidEmail`] when the shape is wrong.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MemberDomainError::EmptyEmail);
        }

        let mut parts = trimmed.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();
        let domain_is_valid = domain
            .split('.')
            .filter(|label| !label.is_empty())
            .count()
            >= 2
            && !domain.starts_with('.')
            && !domain.ends_with('.');
        let is_valid = !local.is_empty()
            && domain_is_valid
            && !has_more_parts
            && !trimmed.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(MemberDomainError::InvalidEmail(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque credential hash produced by a password hasher.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an already computed hash.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::EmptyPasswordHash`] when the value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberDomainError> {
        let hash = value.into();
        if hash.is_empty() {
            return Err(MemberDomainError::EmptyPasswordHash);
        }
        Ok(Self(hash))
    }

    /// Returns the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

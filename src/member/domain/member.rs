//! Member aggregate root.

use super::{EmailAddress, LoginId, MemberId, MemberName, PasswordHash};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated registration fields for a new member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    /// Display name.
    pub name: MemberName,
    /// Unique login identifier.
    pub login_id: LoginId,
    /// Hash of the chosen password.
    pub password_hash: PasswordHash,
    /// Contact email address.
    pub email: EmailAddress,
}

/// Registered member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: MemberName,
    login_id: LoginId,
    password_hash: PasswordHash,
    email: EmailAddress,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMemberData {
    /// Persisted member identifier.
    pub id: MemberId,
    /// Persisted display name.
    pub name: MemberName,
    /// Persisted login identifier.
    pub login_id: LoginId,
    /// Persisted credential hash.
    pub password_hash: PasswordHash,
    /// Persisted contact email.
    pub email: EmailAddress,
    /// Persisted registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Registers a new member with a fresh identifier.
    #[must_use]
    pub fn register(data: NewMember, clock: &impl Clock) -> Self {
        let NewMember {
            name,
            login_id,
            password_hash,
            email,
        } = data;
        Self {
            id: MemberId::new(),
            name,
            login_id,
            password_hash,
            email,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a member from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMemberData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            login_id: data.login_id,
            password_hash: data.password_hash,
            email: data.email,
            created_at: data.created_at,
        }
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &MemberName {
        &self.name
    }

    /// Returns the login identifier.
    #[must_use]
    pub const fn login_id(&self) -> &LoginId {
        &self.login_id
    }

    /// Returns the stored credential hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the contact email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when `candidate` equals the stored hash.
    #[must_use]
    pub fn password_matches(&self, candidate: &PasswordHash) -> bool {
        self.password_hash == *candidate
    }
}

//! Repository port for member persistence and lookup.

use crate::member::domain::{LoginId, Member, MemberId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for member repository operations.
pub type MemberRepositoryResult<T> = Result<T, MemberRepositoryError>;

/// Member persistence contract.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Stores a newly registered member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberRepositoryError::DuplicateMember`] when the identifier
    /// exists or [`MemberRepositoryError::DuplicateLoginId`] when the login id
    /// is already taken.
    async fn store(&self, member: &Member) -> MemberRepositoryResult<()>;

    /// Finds a member by identifier.
    ///
    /// Returns `None` when the member does not exist.
    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<Member>>;

    /// Finds a member by login identifier.
    ///
    /// Returns `None` when no member uses the login id.
    async fn find_by_login_id(&self, login_id: &LoginId)
    -> MemberRepositoryResult<Option<Member>>;

    /// Returns whether a member already uses the login id.
    async fn exists_by_login_id(&self, login_id: &LoginId) -> MemberRepositoryResult<bool>;
}

/// Errors returned by member repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MemberRepositoryError {
    /// A member with the same identifier already exists.
    #[error("duplicate member identifier: {0}")]
    DuplicateMember(MemberId),

    /// A member with the same login identifier already exists.
    #[error("duplicate login id: {0}")]
    DuplicateLoginId(LoginId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MemberRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

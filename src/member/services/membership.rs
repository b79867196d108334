//! Service layer for member registration, login, and lookup.

use crate::error::ErrorKind;
use crate::member::{
    domain::{
        EmailAddress, LoginId, Member, MemberDomainError, MemberId, MemberName, NewMember,
    },
    ports::{MemberRepository, MemberRepositoryError, PasswordHashError, PasswordHasher},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a member.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterMemberRequest {
    name: String,
    login_id: String,
    password: String,
    email: String,
}

impl RegisterMemberRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        login_id: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            login_id: login_id.into(),
            password: password.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Debug for RegisterMemberRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterMemberRequest")
            .field("name", &self.name)
            .field("login_id", &self.login_id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Request payload for logging in.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest {
    login_id: String,
    password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(login_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login_id: login_id.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("login_id", &self.login_id)
            .finish_non_exhaustive()
    }
}

/// Identity handed to the session layer after a successful login.
///
/// The `id` is what callers pass as the acting member to every todo
/// command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginMember {
    /// Authenticated member identifier.
    pub id: MemberId,
    /// Display name.
    pub name: MemberName,
}

impl From<&Member> for LoginMember {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id(),
            name: member.name().clone(),
        }
    }
}

/// Service-level errors for member operations.
#[derive(Debug, Error)]
pub enum MemberServiceError {
    /// Registration input failed validation.
    #[error(transparent)]
    Domain(#[from] MemberDomainError),
    /// The password could not be hashed.
    #[error(transparent)]
    Hash(#[from] PasswordHashError),
    /// The login id is already registered.
    #[error("login id already registered: {0}")]
    DuplicateLoginId(LoginId),
    /// The login id or password did not match.
    #[error("login credentials do not match")]
    LoginFailed,
    /// No member has the identifier.
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(MemberRepositoryError),
}

impl From<MemberRepositoryError> for MemberServiceError {
    fn from(err: MemberRepositoryError) -> Self {
        match err {
            MemberRepositoryError::DuplicateLoginId(login_id) => Self::DuplicateLoginId(login_id),
            other => Self::Repository(other),
        }
    }
}

impl MemberServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::Hash(_) => ErrorKind::Validation,
            Self::DuplicateLoginId(_) => ErrorKind::Conflict,
            Self::LoginFailed => ErrorKind::Authorization,
            Self::MemberNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) => ErrorKind::Infrastructure,
        }
    }
}

/// Result type for member service operations.
pub type MemberServiceResult<T> = Result<T, MemberServiceError>;

/// Member registration and login service.
#[derive(Clone)]
pub struct MemberService<R, H, C>
where
    R: MemberRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> MemberService<R, H, C>
where
    R: MemberRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    /// Creates a new member service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            clock,
        }
    }

    /// Registers a new member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberServiceError::Domain`] or [`MemberServiceError::Hash`]
    /// for invalid input, and [`MemberServiceError::DuplicateLoginId`] when
    /// the login id is taken.
    pub async fn register(&self, request: RegisterMemberRequest) -> MemberServiceResult<Member> {
        let RegisterMemberRequest {
            name,
            login_id,
            password,
            email,
        } = request;

        let member_name = MemberName::new(name)?;
        let member_login_id = LoginId::new(login_id)?;
        let member_email = EmailAddress::new(email)?;
        if password.trim().is_empty() {
            return Err(MemberDomainError::EmptyPassword.into());
        }

        if self.repository.exists_by_login_id(&member_login_id).await? {
            return Err(MemberServiceError::DuplicateLoginId(member_login_id));
        }

        let password_hash = self.hasher.hash(&password)?;
        let member = Member::register(
            NewMember {
                name: member_name,
                login_id: member_login_id,
                password_hash,
                email: member_email,
            },
            &*self.clock,
        );
        self.repository.store(&member).await?;
        tracing::info!(member_id = %member.id(), login_id = %member.login_id(), "member registered");
        Ok(member)
    }

    /// Authenticates a member by login id and password.
    ///
    /// # Errors
    ///
    /// Returns [`MemberServiceError::LoginFailed`] for an unknown login id or
    /// a wrong password alike, and [`MemberServiceError::Repository`] when
    /// lookup fails.
    pub async fn login(&self, request: LoginRequest) -> MemberServiceResult<LoginMember> {
        let Ok(login_id) = LoginId::new(request.login_id) else {
            return Err(MemberServiceError::LoginFailed);
        };
        let Some(member) = self.repository.find_by_login_id(&login_id).await? else {
            tracing::debug!(login_id = %login_id, "login rejected: unknown login id");
            return Err(MemberServiceError::LoginFailed);
        };
        let Ok(candidate) = self.hasher.hash(&request.password) else {
            return Err(MemberServiceError::LoginFailed);
        };
        if !member.password_matches(&candidate) {
            tracing::debug!(member_id = %member.id(), "login rejected: password mismatch");
            return Err(MemberServiceError::LoginFailed);
        }
        Ok(LoginMember::from(&member))
    }

    /// Looks up a member by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MemberServiceError::MemberNotFound`] when no member has the
    /// identifier.
    pub async fn find_member(&self, id: MemberId) -> MemberServiceResult<Member> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(MemberServiceError::MemberNotFound(id))
    }
}

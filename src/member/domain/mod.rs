//! Domain model for member registration and identity.
//!
//! Members own Todos by reference. Their fields are validated once at
//! registration and never mutated afterwards.

mod error;
mod ids;
mod member;
mod profile;

pub use error::MemberDomainError;
pub use ids::MemberId;
pub use member::{Member, NewMember, PersistedMemberData};
pub use profile::{EmailAddress, LoginId, MemberName, PasswordHash};

//! Port contracts for member registration and login.

pub mod hasher;
pub mod repository;

pub use hasher::{PasswordHashError, PasswordHasher};
pub use repository::{MemberRepository, MemberRepositoryError, MemberRepositoryResult};

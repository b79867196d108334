//! Adapter implementations for member ports.

pub mod memory;
pub mod postgres;

mod hashing;

pub use hashing::Sha256PasswordHasher;

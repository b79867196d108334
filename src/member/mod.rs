//! Member registration and login.
//!
//! Members are created once at registration and identified by a
//! [`domain::MemberId`] that the todo services receive as the acting member.
//! The module follows the same hexagonal split as [`crate::todo`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

//! Todo and task lifecycle.
//!
//! A todo is a titled, deadline-bound container owned by one member; tasks
//! are the units of work inside it. Completing the last open task completes
//! the todo, reopening any task reopens it, and nothing changes once the
//! deadline has passed. The module follows hexagonal architecture:
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

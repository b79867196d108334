//! Port contracts for todo and task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by todo services.

pub mod repository;

pub use repository::{
    TodoReader, TodoRepository, TodoRepositoryError, TodoRepositoryResult, TodoTransaction,
};

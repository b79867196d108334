//! Todomate: personal todo and task tracking core.
//!
//! Members register and log in, then manage todos that group tasks. Each
//! todo carries a deadline after which it and its tasks are frozen, and its
//! completion status follows the statuses of its tasks.
//!
//! # Architecture
//!
//! Todomate follows hexagonal architecture principles:
//!
//! - **Domain**: entities and their invariants, with no infrastructure
//!   dependencies
//! - **Ports**: trait interfaces for storage and password hashing
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//! - **Services**: command and query orchestration, including cascades
//!
//! # Modules
//!
//! - [`member`]: registration, login, and member lookup
//! - [`todo`]: todo and task lifecycle, authorization, and read views
//! - [`config`]: input limits and database settings
//! - [`error`]: error classification shared by every service

pub mod config;
pub mod error;
pub mod member;
pub mod todo;

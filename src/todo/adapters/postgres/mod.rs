//! `PostgreSQL` adapters for todo and task persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTodoRepository;

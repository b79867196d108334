//! In-memory todo adapters.

mod store;

pub use store::InMemoryTodoRepository;

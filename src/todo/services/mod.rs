//! Application services for the todo lifecycle.
//!
//! Every command runs inside one [`TodoRepository::transaction`]: the
//! guard, the entity transition, and any cascade onto the parent todo
//! commit together or not at all.
//!
//! [`TodoRepository::transaction`]: crate::todo::ports::TodoRepository::transaction

mod error;
mod guard;
mod read;
mod requests;
mod task_write;
mod todo_write;

pub use error::{TodoServiceError, TodoServiceResult};
pub use read::{TodoReadService, TodoWithTasks};
pub use requests::CreateTodoRequest;
pub use task_write::{TaskStatusChange, TaskWriteService};
pub use todo_write::TodoWriteService;

//! Domain model for todos and their tasks.
//!
//! Entities here enforce their own invariants (non-blank text, deadline
//! freeze, guarded status transitions, ownership) but never look at sibling
//! records. Cascades across tasks live in [`crate::todo::services`].

mod deadline;
mod error;
mod ids;
mod status;
mod task;
mod todo;

pub use deadline::Deadline;
pub use error::{ParseStatusError, TodoDomainError};
pub use ids::{TaskId, TodoId};
pub use status::CompletionStatus;
pub use task::{PersistedTaskData, Task};
pub use todo::{PersistedTodoData, Todo, TodoChanges};

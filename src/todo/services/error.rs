//! Service-level errors for todo and task commands.

use crate::error::ErrorKind;
use crate::todo::{
    domain::{TaskId, TodoDomainError, TodoId},
    ports::TodoRepositoryError,
};
use thiserror::Error;

/// Errors returned by the todo services.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// An entity rule rejected the command.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// The addressed todo does not exist.
    #[error("todo not found: {0}")]
    TodoNotFound(TodoId),
    /// The addressed task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(TodoRepositoryError),
}

impl From<TodoRepositoryError> for TodoServiceError {
    fn from(err: TodoRepositoryError) -> Self {
        match err {
            TodoRepositoryError::TodoNotFound(id) => Self::TodoNotFound(id),
            TodoRepositoryError::TaskNotFound(id) => Self::TaskNotFound(id),
            other => Self::Repository(other),
        }
    }
}

impl TodoServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::TodoNotFound(_) | Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::Repository(
                TodoRepositoryError::DuplicateTodo(_) | TodoRepositoryError::DuplicateTask(_),
            ) => ErrorKind::Conflict,
            Self::Repository(_) => ErrorKind::Infrastructure,
        }
    }
}

/// Result type for todo service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

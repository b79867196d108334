//! Error types for todo and task domain validation.

use super::{Deadline, TaskId, TodoId};
use crate::error::ErrorKind;
use crate::member::domain::MemberId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by todo and task entity operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The todo title is empty after trimming.
    #[error("todo title must not be empty")]
    EmptyTitle,

    /// The todo title exceeds the configured limit.
    #[error("todo title has {length} characters, limit is {max}")]
    TitleTooLong {
        /// Title length in characters.
        length: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The task content is empty after trimming.
    #[error("task content must not be empty")]
    EmptyContent,

    /// The task content exceeds the configured limit.
    #[error("task content has {length} characters, limit is {max}")]
    ContentTooLong {
        /// Content length in characters.
        length: usize,
        /// Configured maximum.
        max: usize,
    },

    /// No deadline was supplied for a new todo.
    #[error("a deadline is required")]
    MissingDeadline,

    /// A supplied deadline lies before the current time.
    #[error("deadline {deadline} is earlier than now ({now})")]
    DeadlineInPast {
        /// Rejected deadline.
        deadline: Deadline,
        /// Clock reading used for the comparison.
        now: DateTime<Utc>,
    },

    /// The todo's deadline has elapsed, freezing it and its tasks.
    #[error("deadline {deadline} of todo {todo_id} has passed")]
    DeadlineExceeded {
        /// Frozen todo.
        todo_id: TodoId,
        /// Elapsed deadline.
        deadline: Deadline,
    },

    /// A completed todo cannot be edited.
    #[error("todo {0} is complete and cannot be edited")]
    CompletedTodoImmutable(TodoId),

    /// The todo is already complete.
    #[error("todo {0} is already complete")]
    TodoAlreadyComplete(TodoId),

    /// The todo is not complete, so it cannot be reopened.
    #[error("todo {0} is not complete")]
    TodoNotComplete(TodoId),

    /// A completed task cannot be edited.
    #[error("task {0} is complete and cannot be edited")]
    CompletedTaskImmutable(TaskId),

    /// The task is already complete.
    #[error("task {0} is already complete")]
    TaskAlreadyComplete(TaskId),

    /// The task is not complete, so it cannot be reopened.
    #[error("task {0} is not complete")]
    TaskNotComplete(TaskId),

    /// The acting member does not own the todo.
    #[error("member {member_id} does not own todo {todo_id}")]
    NotOwner {
        /// Todo that was addressed.
        todo_id: TodoId,
        /// Acting member.
        member_id: MemberId,
    },

    /// The task belongs to a different todo than the one addressed.
    #[error("task {task_id} does not belong to todo {todo_id}")]
    TaskNotInTodo {
        /// Addressed task.
        task_id: TaskId,
        /// Todo named by the caller.
        todo_id: TodoId,
    },
}

impl TodoDomainError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTitle
            | Self::TitleTooLong { .. }
            | Self::EmptyContent
            | Self::ContentTooLong { .. }
            | Self::MissingDeadline
            | Self::DeadlineInPast { .. } => ErrorKind::Validation,
            Self::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
            Self::CompletedTodoImmutable(_)
            | Self::TodoAlreadyComplete(_)
            | Self::TodoNotComplete(_)
            | Self::CompletedTaskImmutable(_)
            | Self::TaskAlreadyComplete(_)
            | Self::TaskNotComplete(_) => ErrorKind::State,
            Self::NotOwner { .. } => ErrorKind::Authorization,
            Self::TaskNotInTodo { .. } => ErrorKind::Integrity,
        }
    }
}

/// Error returned while parsing a completion status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown completion status: {0}")]
pub struct ParseStatusError(pub String);

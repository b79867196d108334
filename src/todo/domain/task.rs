//! Task entity scoped to a single todo.

use super::{CompletionStatus, TaskId, Todo, TodoDomainError, TodoId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Atomic unit of work belonging to exactly one todo.
///
/// A task has no owner of its own; callers authorize through the parent
/// [`Todo`]. Operations that depend on the parent's deadline take the parent
/// as an argument and check it really is the parent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    todo_id: TodoId,
    content: String,
    status: CompletionStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Parent todo.
    pub todo_id: TodoId,
    /// Persisted content.
    pub content: String,
    /// Persisted completion status.
    pub status: CompletionStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, if complete.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new incomplete task under `todo`.
    ///
    /// The clock is read once; that instant is both the creation timestamp
    /// and the value compared against the parent deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyContent`] for blank content or
    /// [`TodoDomainError::DeadlineExceeded`] when the parent deadline has
    /// passed.
    pub fn new(
        todo: &Todo,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TodoDomainError> {
        let created_at = clock.utc();
        let validated_content = validated_content(content.into())?;
        todo.ensure_open_at(created_at)?;

        Ok(Self {
            id: TaskId::new(),
            todo_id: todo.id(),
            content: validated_content,
            status: CompletionStatus::Incomplete,
            created_at,
            updated_at: created_at,
            completed_at: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            todo_id: data.todo_id,
            content: data.content,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the parent todo identifier.
    #[must_use]
    pub const fn todo_id(&self) -> TodoId {
        self.todo_id
    }

    /// Returns the content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> CompletionStatus {
        self.status
    }

    /// Returns `true` when the task is complete.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.status.is_complete()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the task was completed, if it is complete.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Replaces the content.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::TaskNotInTodo`] when `todo` is not the
    /// parent, [`TodoDomainError::EmptyContent`] for blank content,
    /// [`TodoDomainError::CompletedTaskImmutable`] when complete, or
    /// [`TodoDomainError::DeadlineExceeded`] when the parent deadline has
    /// passed.
    pub fn update(
        &mut self,
        todo: &Todo,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TodoDomainError> {
        self.validate_belongs_to(todo.id())?;
        let now = clock.utc();
        let validated = validated_content(content.into())?;
        if self.is_complete() {
            return Err(TodoDomainError::CompletedTaskImmutable(self.id));
        }
        todo.ensure_open_at(now)?;

        self.content = validated;
        self.updated_at = now;
        Ok(())
    }

    /// Marks the task complete.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::TaskNotInTodo`] when `todo` is not the
    /// parent, [`TodoDomainError::DeadlineExceeded`] when the parent deadline
    /// has passed, or [`TodoDomainError::TaskAlreadyComplete`] when already
    /// complete.
    pub fn complete(&mut self, todo: &Todo, clock: &impl Clock) -> Result<(), TodoDomainError> {
        self.validate_belongs_to(todo.id())?;
        let now = clock.utc();
        todo.ensure_open_at(now)?;
        if self.is_complete() {
            return Err(TodoDomainError::TaskAlreadyComplete(self.id));
        }
        self.status = CompletionStatus::Complete;
        self.completed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Reopens a completed task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::TaskNotInTodo`] when `todo` is not the
    /// parent, [`TodoDomainError::DeadlineExceeded`] when the parent deadline
    /// has passed, or [`TodoDomainError::TaskNotComplete`] when not complete.
    pub fn incomplete(&mut self, todo: &Todo, clock: &impl Clock) -> Result<(), TodoDomainError> {
        self.validate_belongs_to(todo.id())?;
        let now = clock.utc();
        todo.ensure_open_at(now)?;
        if !self.is_complete() {
            return Err(TodoDomainError::TaskNotComplete(self.id));
        }
        self.status = CompletionStatus::Incomplete;
        self.completed_at = None;
        self.updated_at = now;
        Ok(())
    }

    /// Checks that the task belongs to `todo_id`.
    ///
    /// Guards against a task id being addressed through the wrong todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::TaskNotInTodo`] when the parent differs.
    pub fn validate_belongs_to(&self, todo_id: TodoId) -> Result<(), TodoDomainError> {
        if self.todo_id != todo_id {
            return Err(TodoDomainError::TaskNotInTodo {
                task_id: self.id,
                todo_id,
            });
        }
        Ok(())
    }
}

fn validated_content(raw: String) -> Result<String, TodoDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TodoDomainError::EmptyContent);
    }
    Ok(trimmed.to_owned())
}

//! Repository port for transactional todo and task storage.

use crate::member::domain::MemberId;
use crate::todo::domain::{CompletionStatus, Task, TaskId, Todo, TodoId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Lookups available to read-only units and to transactions.
///
/// Inside a transaction every read observes the writes already made through
/// the same transaction, so cascade checks see the task that was just
/// changed.
pub trait TodoReader {
    /// Finds a todo by identifier without locking it.
    ///
    /// Returns `None` when the todo does not exist.
    fn find_todo(&mut self, id: TodoId) -> TodoRepositoryResult<Option<Todo>>;

    /// Returns the member's todos ordered by deadline, then creation time,
    /// optionally restricted to one status.
    fn find_todos_by_writer(
        &mut self,
        writer_id: MemberId,
        status: Option<CompletionStatus>,
    ) -> TodoRepositoryResult<Vec<Todo>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    fn find_task(&mut self, id: TaskId) -> TodoRepositoryResult<Option<Task>>;

    /// Returns every task of a todo ordered by creation time.
    fn find_tasks_by_todo(&mut self, todo_id: TodoId) -> TodoRepositoryResult<Vec<Task>>;

    /// Returns whether any task of the todo has the given status.
    fn exists_task_with_status(
        &mut self,
        todo_id: TodoId,
        status: CompletionStatus,
    ) -> TodoRepositoryResult<bool>;
}

/// Record operations available inside one store transaction.
pub trait TodoTransaction: TodoReader {
    /// Finds a todo and locks it until the transaction ends.
    ///
    /// Writers touching a todo or any of its tasks take this lock first, so
    /// concurrent cascades under one todo run one after another.
    fn lock_todo(&mut self, id: TodoId) -> TodoRepositoryResult<Option<Todo>>;

    /// Stores a new todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateTodo`] when the id exists.
    fn insert_todo(&mut self, todo: &Todo) -> TodoRepositoryResult<()>;

    /// Persists changes to an existing todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TodoNotFound`] when the todo is gone.
    fn update_todo(&mut self, todo: &Todo) -> TodoRepositoryResult<()>;

    /// Removes a todo. Its tasks must already be gone.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TodoNotFound`] when the todo is gone.
    fn delete_todo(&mut self, id: TodoId) -> TodoRepositoryResult<()>;

    /// Stores a new task under an existing todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateTask`] when the id exists or
    /// [`TodoRepositoryError::TodoNotFound`] when the parent is missing.
    fn insert_task(&mut self, task: &Task) -> TodoRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TaskNotFound`] when the task is gone.
    fn update_task(&mut self, task: &Task) -> TodoRepositoryResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TaskNotFound`] when the task is gone.
    fn delete_task(&mut self, id: TaskId) -> TodoRepositoryResult<()>;

    /// Removes every task of a todo and returns how many were removed.
    fn delete_tasks_by_todo(&mut self, todo_id: TodoId) -> TodoRepositoryResult<usize>;
}

/// Todo persistence contract.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Runs `work` as one atomic unit.
    ///
    /// When `work` returns `Ok` all of its writes are committed together;
    /// when it returns `Err` none of them are visible afterwards.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a
    /// [`TodoRepositoryError`] converted into `E` when the store fails to
    /// open or commit the transaction.
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TodoTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TodoRepositoryError> + Send + 'static;

    /// Runs read-only `work` against one consistent view of the store.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a
    /// [`TodoRepositoryError`] converted into `E` when the store fails.
    async fn read<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TodoReader) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TodoRepositoryError> + Send + 'static;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// A todo with the same identifier already exists.
    #[error("duplicate todo identifier: {0}")]
    DuplicateTodo(TodoId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The todo was not found.
    #[error("todo not found: {0}")]
    TodoNotFound(TodoId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

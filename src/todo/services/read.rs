//! Owner-filtered read views over todos and tasks.

use super::{
    TodoServiceResult,
    guard::{readable_task, readable_todo},
};
use crate::member::domain::MemberId;
use crate::todo::{
    domain::{CompletionStatus, Task, TaskId, Todo, TodoId},
    ports::TodoRepository,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Detail view of a todo with its tasks ordered by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoWithTasks {
    /// The todo.
    pub todo: Todo,
    /// Its tasks; empty when none have been added.
    pub tasks: Vec<Task>,
}

/// Read service for todos and tasks.
///
/// Every view is restricted to the acting member's own todos.
#[derive(Clone)]
pub struct TodoReadService<R>
where
    R: TodoRepository,
{
    repository: Arc<R>,
}

impl<R> TodoReadService<R>
where
    R: TodoRepository,
{
    /// Creates a new read service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists the actor's todos ordered by deadline, then creation time.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::Repository`] when the store fails.
    pub async fn list_todos(
        &self,
        actor: MemberId,
        status: Option<CompletionStatus>,
    ) -> TodoServiceResult<Vec<Todo>> {
        self.repository
            .read(move |store| -> TodoServiceResult<Vec<Todo>> {
                Ok(store.find_todos_by_writer(actor, status)?)
            })
            .await
    }

    /// Returns an owned todo together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::TodoNotFound`] for an unknown todo
    /// and [`super::TodoServiceError::Domain`] when the actor is not the
    /// owner.
    pub async fn todo_with_tasks(
        &self,
        actor: MemberId,
        todo_id: TodoId,
    ) -> TodoServiceResult<TodoWithTasks> {
        self.repository
            .read(move |store| -> TodoServiceResult<TodoWithTasks> {
                let todo = readable_todo(store, actor, todo_id)?;
                let tasks = store.find_tasks_by_todo(todo_id)?;
                Ok(TodoWithTasks { todo, tasks })
            })
            .await
    }

    /// Lists the tasks of an owned todo ordered by creation time.
    ///
    /// # Errors
    ///
    /// Same as [`Self::todo_with_tasks`].
    pub async fn list_tasks(
        &self,
        actor: MemberId,
        todo_id: TodoId,
    ) -> TodoServiceResult<Vec<Task>> {
        self.repository
            .read(move |store| -> TodoServiceResult<Vec<Task>> {
                readable_todo(store, actor, todo_id)?;
                Ok(store.find_tasks_by_todo(todo_id)?)
            })
            .await
    }

    /// Returns one task of an owned todo.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::TaskNotFound`] or
    /// [`super::TodoServiceError::TodoNotFound`] for unknown records and
    /// [`super::TodoServiceError::Domain`] when the task is under another
    /// todo or the actor is not the owner.
    pub async fn task_detail(
        &self,
        actor: MemberId,
        todo_id: TodoId,
        task_id: TaskId,
    ) -> TodoServiceResult<Task> {
        self.repository
            .read(move |store| -> TodoServiceResult<Task> {
                let (_, task) = readable_task(store, actor, todo_id, task_id)?;
                Ok(task)
            })
            .await
    }
}

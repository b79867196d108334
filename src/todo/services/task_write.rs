//! Task commands and the cascade rules they drive onto the parent todo.

use super::{
    TodoServiceResult,
    guard::{writable_task, writable_todo},
};
use crate::config::TodoPolicy;
use crate::member::domain::MemberId;
use crate::todo::{
    domain::{CompletionStatus, Task, TaskId, Todo, TodoId},
    ports::{TodoRepository, TodoTransaction},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of a task status change.
///
/// `todo` reflects any cascade the change triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusChange {
    /// The task after the transition.
    pub task: Task,
    /// The parent todo after any cascade.
    pub todo: Todo,
}

/// Write service for tasks.
///
/// Completing the last incomplete task completes the parent todo.
/// Reopening any task reopens a complete parent. Deleting the last task of a
/// complete todo reopens it.
#[derive(Clone)]
pub struct TaskWriteService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync + 'static,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: TodoPolicy,
}

impl<R, C> TaskWriteService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new task write service with the default [`TodoPolicy`].
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            policy: TodoPolicy::default(),
        }
    }

    /// Replaces the input length policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: TodoPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds a task to an owned todo.
    ///
    /// A new task is incomplete but does not reopen a complete todo.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::TodoNotFound`] for an unknown todo
    /// and [`super::TodoServiceError::Domain`] when the actor is not the
    /// owner, the content is blank or over-long, or the deadline has passed.
    pub async fn add(
        &self,
        actor: MemberId,
        todo_id: TodoId,
        content: impl Into<String>,
    ) -> TodoServiceResult<Task> {
        let task_content = content.into();
        let clock = Arc::clone(&self.clock);
        let policy = self.policy;

        let task = self
            .repository
            .transaction(move |tx| -> TodoServiceResult<Task> {
                let todo = writable_todo(tx, actor, todo_id)?;
                let task = Task::new(&todo, task_content, &*clock)?;
                policy.check_content(task.content())?;
                tx.insert_task(&task)?;
                Ok(task)
            })
            .await?;

        tracing::info!(todo_id = %todo_id, task_id = %task.id(), member_id = %actor, "task added");
        Ok(task)
    }

    /// Replaces the content of a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::TaskNotFound`] or
    /// [`super::TodoServiceError::TodoNotFound`] for unknown records and
    /// [`super::TodoServiceError::Domain`] when the task is under another
    /// todo, the actor is not the owner, the task is complete, the content is
    /// invalid, or the deadline has passed.
    pub async fn update(
        &self,
        actor: MemberId,
        todo_id: TodoId,
        task_id: TaskId,
        content: impl Into<String>,
    ) -> TodoServiceResult<Task> {
        let task_content = content.into();
        let clock = Arc::clone(&self.clock);
        let policy = self.policy;

        let task = self
            .repository
            .transaction(move |tx| -> TodoServiceResult<Task> {
                let (todo, mut task) = writable_task(tx, actor, todo_id, task_id)?;
                task.update(&todo, task_content, &*clock)?;
                policy.check_content(task.content())?;
                tx.update_task(&task)?;
                Ok(task)
            })
            .await?;

        tracing::info!(todo_id = %todo_id, task_id = %task_id, member_id = %actor, "task updated");
        Ok(task)
    }

    /// Moves a task to `target` and cascades onto the parent todo.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::TaskNotFound`] or
    /// [`super::TodoServiceError::TodoNotFound`] for unknown records and
    /// [`super::TodoServiceError::Domain`] when the task is under another
    /// todo, the actor is not the owner, the deadline has passed, or the task
    /// is already in `target`.
    pub async fn set_status(
        &self,
        actor: MemberId,
        todo_id: TodoId,
        task_id: TaskId,
        target: CompletionStatus,
    ) -> TodoServiceResult<TaskStatusChange> {
        let clock = Arc::clone(&self.clock);

        let change = self
            .repository
            .transaction(move |tx| -> TodoServiceResult<TaskStatusChange> {
                let (mut todo, mut task) = writable_task(tx, actor, todo_id, task_id)?;
                match target {
                    CompletionStatus::Complete => task.complete(&todo, &*clock)?,
                    CompletionStatus::Incomplete => task.incomplete(&todo, &*clock)?,
                }
                tx.update_task(&task)?;

                if cascade_onto_todo(tx, &mut todo, target, &*clock)? {
                    tx.update_todo(&todo)?;
                }
                Ok(TaskStatusChange { task, todo })
            })
            .await?;

        tracing::info!(
            todo_id = %todo_id,
            task_id = %task_id,
            member_id = %actor,
            task_status = %change.task.status(),
            todo_status = %change.todo.status(),
            "task status set"
        );
        Ok(change)
    }

    /// Deletes a task and returns its parent todo.
    ///
    /// When the last task of a complete todo is removed the todo reverts to
    /// incomplete, unless its deadline has passed.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::TaskNotFound`] or
    /// [`super::TodoServiceError::TodoNotFound`] for unknown records and
    /// [`super::TodoServiceError::Domain`] when the task is under another
    /// todo or the actor is not the owner.
    pub async fn delete(
        &self,
        actor: MemberId,
        todo_id: TodoId,
        task_id: TaskId,
    ) -> TodoServiceResult<Todo> {
        let clock = Arc::clone(&self.clock);

        let todo = self
            .repository
            .transaction(move |tx| -> TodoServiceResult<Todo> {
                let (mut todo, _) = writable_task(tx, actor, todo_id, task_id)?;
                tx.delete_task(task_id)?;

                if todo.is_complete() && tx.find_tasks_by_todo(todo_id)?.is_empty() {
                    if todo.is_frozen(&*clock) {
                        tracing::debug!(
                            todo_id = %todo_id,
                            "todo left complete after last task deleted: deadline passed"
                        );
                    } else {
                        todo.incomplete(&*clock)?;
                        tx.update_todo(&todo)?;
                        tracing::debug!(todo_id = %todo_id, "todo reopened: no tasks remain");
                    }
                }
                Ok(todo)
            })
            .await?;

        tracing::info!(todo_id = %todo_id, task_id = %task_id, member_id = %actor, "task deleted");
        Ok(todo)
    }
}

/// Applies the cascade for a task that just moved to `target`.
///
/// Returns `true` when the todo changed and must be written back.
fn cascade_onto_todo(
    tx: &mut dyn TodoTransaction,
    todo: &mut Todo,
    target: CompletionStatus,
    clock: &impl Clock,
) -> TodoServiceResult<bool> {
    match target {
        CompletionStatus::Complete => {
            if todo.is_complete() {
                return Ok(false);
            }
            if tx.exists_task_with_status(todo.id(), CompletionStatus::Incomplete)? {
                return Ok(false);
            }
            todo.complete(clock)?;
            tracing::debug!(todo_id = %todo.id(), "todo completed: every task complete");
            Ok(true)
        }
        CompletionStatus::Incomplete => {
            if !todo.is_complete() {
                return Ok(false);
            }
            todo.incomplete(clock)?;
            tracing::debug!(todo_id = %todo.id(), "todo reopened: a task was reopened");
            Ok(true)
        }
    }
}

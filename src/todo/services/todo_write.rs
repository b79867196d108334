//! Todo commands: create, update, status changes, and delete.

use super::{
    CreateTodoRequest, TodoServiceResult,
    guard::writable_todo,
};
use crate::config::TodoPolicy;
use crate::member::domain::MemberId;
use crate::todo::{
    domain::{CompletionStatus, Todo, TodoChanges, TodoId},
    ports::{TodoRepository, TodoTransaction},
};
use mockable::Clock;
use std::sync::Arc;

/// Write service for todos.
#[derive(Clone)]
pub struct TodoWriteService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync + 'static,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: TodoPolicy,
}

impl<R, C> TodoWriteService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new todo write service with the default [`TodoPolicy`].
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

    /// Creates a todo owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::Domain`] for a blank or over-long
    /// title, a missing deadline, or a deadline already in the past.
    pub async fn create(
        &self,
        actor: MemberId,
        request: CreateTodoRequest,
    ) -> TodoServiceResult<Todo> {
        let CreateTodoRequest { title, deadline } = request;
        self.policy.check_title(&title)?;
        let todo = Todo::new(actor, title, deadline, &*self.clock)?;

        let stored = todo.clone();
        self.repository
            .transaction(move |tx| -> TodoServiceResult<()> {
                tx.insert_todo(&stored)?;
                Ok(())
            })
            .await?;

        tracing::info!(todo_id = %todo.id(), member_id = %actor, "todo created");
        Ok(todo)
    }

    /// Applies the present fields of `changes` to an owned todo.
    ///
    /// An empty change set returns the stored todo untouched once ownership
    /// is confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::TodoNotFound`] for an unknown todo
    /// and [`super::TodoServiceError::Domain`] when the actor is not the
    /// owner, the todo is complete or frozen, or a field is invalid.
    pub async fn update(
        &self,
        actor: MemberId,
        todo_id: TodoId,
        changes: TodoChanges,
    ) -> TodoServiceResult<Todo> {
        let clock = Arc::clone(&self.clock);
        let policy = self.policy;

        let todo = self
            .repository
            .transaction(move |tx| -> TodoServiceResult<Todo> {
                let mut todo = writable_todo(tx, actor, todo_id)?;
                if changes.is_empty() {
                    tracing::debug!(todo_id = %todo_id, "todo update skipped: no changes");
                    return Ok(todo);
                }
                let renamed = changes.title.is_some();
                todo.update(changes, &*clock)?;
                if renamed {
                    policy.check_title(todo.title())?;
                }
                tx.update_todo(&todo)?;
                Ok(todo)
            })
            .await?;

        tracing::info!(todo_id = %todo_id, member_id = %actor, "todo updated");
        Ok(todo)
    }

    /// Moves an owned todo to `target`.
    ///
    /// Completing is a silent no-op unless the todo has at least one task and
    /// none of them is incomplete; the unchanged todo is returned.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::TodoNotFound`] for an unknown todo
    /// and [`super::TodoServiceError::Domain`] when the actor is not the
    /// owner, the deadline has passed, or the todo is already in `target`.
    pub async fn set_status(
        &self,
        actor: MemberId,
        todo_id: TodoId,
        target: CompletionStatus,
    ) -> TodoServiceResult<Todo> {
        let clock = Arc::clone(&self.clock);

        let todo = self
            .repository
            .transaction(move |tx| -> TodoServiceResult<Todo> {
                let mut todo = writable_todo(tx, actor, todo_id)?;
                match target {
                    CompletionStatus::Complete => {
                        todo.ensure_open(&*clock)?;
                        if !tasks_all_complete(tx, todo_id)? {
                            tracing::debug!(
                                todo_id = %todo_id,
                                "todo completion skipped: no tasks or some still incomplete"
                            );
                            return Ok(todo);
                        }
                        todo.complete(&*clock)?;
                    }
                    CompletionStatus::Incomplete => todo.incomplete(&*clock)?,
                }
                tx.update_todo(&todo)?;
                Ok(todo)
            })
            .await?;

        tracing::info!(
            todo_id = %todo_id,
            member_id = %actor,
            status = %todo.status(),
            "todo status set"
        );
        Ok(todo)
    }

    /// Deletes an owned todo together with all of its tasks.
    ///
    /// Deletion is allowed after the deadline has passed.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::TodoNotFound`] for an unknown todo
    /// and [`super::TodoServiceError::Domain`] when the actor is not the
    /// owner.
    pub async fn delete(&self, actor: MemberId, todo_id: TodoId) -> TodoServiceResult<()> {
        let removed_tasks = self
            .repository
            .transaction(move |tx| -> TodoServiceResult<usize> {
                writable_todo(tx, actor, todo_id)?;
                let removed = tx.delete_tasks_by_todo(todo_id)?;
                tx.delete_todo(todo_id)?;
                Ok(removed)
            })
            .await?;

        tracing::info!(
            todo_id = %todo_id,
            member_id = %actor,
            removed_tasks,
            "todo deleted"
        );
        Ok(())
    }
}

/// Returns `true` when the todo has tasks and every one is complete.
fn tasks_all_complete(tx: &mut dyn TodoTransaction, todo_id: TodoId) -> TodoServiceResult<bool> {
    let any_incomplete = tx.exists_task_with_status(todo_id, CompletionStatus::Incomplete)?;
    if any_incomplete {
        return Ok(false);
    }
    Ok(tx.exists_task_with_status(todo_id, CompletionStatus::Complete)?)
}

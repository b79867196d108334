//! Ownership-checked loaders shared by the todo services.

use super::{TodoServiceError, TodoServiceResult};
use crate::member::domain::MemberId;
use crate::todo::{
    domain::{Task, TaskId, Todo, TodoId},
    ports::{TodoReader, TodoTransaction},
};

/// Loads a todo without locking it and checks that `actor` owns it.
pub(super) fn readable_todo<S>(
    store: &mut S,
    actor: MemberId,
    todo_id: TodoId,
) -> TodoServiceResult<Todo>
where
    S: TodoReader + ?Sized,
{
    let todo = store
        .find_todo(todo_id)?
        .ok_or(TodoServiceError::TodoNotFound(todo_id))?;
    todo.validate_ownership(actor)?;
    Ok(todo)
}

/// Locks a todo and checks that `actor` owns it.
///
/// Holding the row lock serialises cascades under one todo.
pub(super) fn writable_todo(
    tx: &mut dyn TodoTransaction,
    actor: MemberId,
    todo_id: TodoId,
) -> TodoServiceResult<Todo> {
    let todo = tx
        .lock_todo(todo_id)?
        .ok_or(TodoServiceError::TodoNotFound(todo_id))?;
    todo.validate_ownership(actor)?;
    Ok(todo)
}

/// Loads a task for reading through its parent todo.
///
/// Order: task lookup, parentage, parent lookup, ownership.
pub(super) fn readable_task<S>(
    store: &mut S,
    actor: MemberId,
    todo_id: TodoId,
    task_id: TaskId,
) -> TodoServiceResult<(Todo, Task)>
where
    S: TodoReader + ?Sized,
{
    let task = parented_task(store, todo_id, task_id)?;
    let todo = readable_todo(store, actor, todo_id)?;
    Ok((todo, task))
}

/// Loads a task for writing, with the same check order as
/// [`readable_task`], and the parent todo locked.
pub(super) fn writable_task(
    tx: &mut dyn TodoTransaction,
    actor: MemberId,
    todo_id: TodoId,
    task_id: TaskId,
) -> TodoServiceResult<(Todo, Task)> {
    parented_task(tx, todo_id, task_id)?;
    let todo = writable_todo(tx, actor, todo_id)?;

    // The first read happened before the parent lock was held.
    let current = tx
        .find_task(task_id)?
        .ok_or(TodoServiceError::TaskNotFound(task_id))?;
    Ok((todo, current))
}

fn parented_task<S>(store: &mut S, todo_id: TodoId, task_id: TaskId) -> TodoServiceResult<Task>
where
    S: TodoReader + ?Sized,
{
    let task = store
        .find_task(task_id)?
        .ok_or(TodoServiceError::TaskNotFound(task_id))?;
    task.validate_belongs_to(todo_id)?;
    Ok(task)
}

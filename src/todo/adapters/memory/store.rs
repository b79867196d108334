//! In-memory transactional store for todos and tasks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::member::domain::MemberId;
use crate::todo::{
    domain::{CompletionStatus, Task, TaskId, Todo, TodoId},
    ports::{
        TodoReader, TodoRepository, TodoRepositoryError, TodoRepositoryResult, TodoTransaction,
    },
};

/// Thread-safe in-memory todo repository.
///
/// Transactions are serialised behind one write lock. Each runs against a
/// staged copy of the state that replaces the live state only when the work
/// succeeds. Read-only units share the read lock and see the live state
/// without copying it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    state: Arc<RwLock<InMemoryTodoState>>,
}

#[derive(Debug, Clone, Default)]
struct InMemoryTodoState {
    todos: HashMap<TodoId, Todo>,
    tasks: HashMap<TaskId, Task>,
    task_index: HashMap<TodoId, Vec<TaskId>>,
}

impl InMemoryTodoRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl std::fmt::Display) -> TodoRepositoryError {
    TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Removes a task ID from the per-todo index, dropping the entry if empty.
fn remove_from_index(index: &mut HashMap<TodoId, Vec<TaskId>>, todo_id: TodoId, task_id: TaskId) {
    if let Some(ids) = index.get_mut(&todo_id) {
        ids.retain(|id| *id != task_id);
        if ids.is_empty() {
            index.remove(&todo_id);
        }
    }
}

/// Read-only view over the live state, used under the read lock.
struct StateView<'state>(&'state InMemoryTodoState);

impl TodoReader for StateView<'_> {
    fn find_todo(&mut self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        Ok(self.0.todos.get(&id).cloned())
    }

    fn find_todos_by_writer(
        &mut self,
        writer_id: MemberId,
        status: Option<CompletionStatus>,
    ) -> TodoRepositoryResult<Vec<Todo>> {
        let mut todos: Vec<Todo> = self
            .0
            .todos
            .values()
            .filter(|todo| todo.writer_id() == writer_id)
            .filter(|todo| status.is_none_or(|wanted| todo.status() == wanted))
            .cloned()
            .collect();
        todos.sort_by_key(|todo| (todo.deadline(), todo.created_at(), todo.id()));
        Ok(todos)
    }

    fn find_task(&mut self, id: TaskId) -> TodoRepositoryResult<Option<Task>> {
        Ok(self.0.tasks.get(&id).cloned())
    }

    fn find_tasks_by_todo(&mut self, todo_id: TodoId) -> TodoRepositoryResult<Vec<Task>> {
        let state = self.0;
        let mut tasks: Vec<Task> = state
            .task_index
            .get(&todo_id)
            .map(|ids| ids.iter().filter_map(|id| state.tasks.get(id).cloned()).collect())
            .unwrap_or_default();
        tasks.sort_by_key(|task| (task.created_at(), task.id()));
        Ok(tasks)
    }

    fn exists_task_with_status(
        &mut self,
        todo_id: TodoId,
        status: CompletionStatus,
    ) -> TodoRepositoryResult<bool> {
        let state = self.0;
        let exists = state.task_index.get(&todo_id).is_some_and(|ids| {
            ids.iter()
                .filter_map(|id| state.tasks.get(id))
                .any(|task| task.status() == status)
        });
        Ok(exists)
    }
}

impl TodoReader for InMemoryTodoState {
    fn find_todo(&mut self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        StateView(self).find_todo(id)
    }

    fn find_todos_by_writer(
        &mut self,
        writer_id: MemberId,
        status: Option<CompletionStatus>,
    ) -> TodoRepositoryResult<Vec<Todo>> {
        StateView(self).find_todos_by_writer(writer_id, status)
    }

    fn find_task(&mut self, id: TaskId) -> TodoRepositoryResult<Option<Task>> {
        StateView(self).find_task(id)
    }

    fn find_tasks_by_todo(&mut self, todo_id: TodoId) -> TodoRepositoryResult<Vec<Task>> {
        StateView(self).find_tasks_by_todo(todo_id)
    }

    fn exists_task_with_status(
        &mut self,
        todo_id: TodoId,
        status: CompletionStatus,
    ) -> TodoRepositoryResult<bool> {
        StateView(self).exists_task_with_status(todo_id, status)
    }
}

impl TodoTransaction for InMemoryTodoState {
    fn lock_todo(&mut self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        // The repository-wide write lock already serialises transactions.
        self.find_todo(id)
    }

    fn insert_todo(&mut self, todo: &Todo) -> TodoRepositoryResult<()> {
        if self.todos.contains_key(&todo.id()) {
            return Err(TodoRepositoryError::DuplicateTodo(todo.id()));
        }
        self.todos.insert(todo.id(), todo.clone());
        Ok(())
    }

    fn update_todo(&mut self, todo: &Todo) -> TodoRepositoryResult<()> {
        let slot = self
            .todos
            .get_mut(&todo.id())
            .ok_or(TodoRepositoryError::TodoNotFound(todo.id()))?;
        *slot = todo.clone();
        Ok(())
    }

    fn delete_todo(&mut self, id: TodoId) -> TodoRepositoryResult<()> {
        self.todos
            .remove(&id)
            .ok_or(TodoRepositoryError::TodoNotFound(id))?;
        Ok(())
    }

    fn insert_task(&mut self, task: &Task) -> TodoRepositoryResult<()> {
        if self.tasks.contains_key(&task.id()) {
            return Err(TodoRepositoryError::DuplicateTask(task.id()));
        }
        if !self.todos.contains_key(&task.todo_id()) {
            return Err(TodoRepositoryError::TodoNotFound(task.todo_id()));
        }
        self.task_index
            .entry(task.todo_id())
            .or_default()
            .push(task.id());
        self.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    fn update_task(&mut self, task: &Task) -> TodoRepositoryResult<()> {
        let slot = self
            .tasks
            .get_mut(&task.id())
            .ok_or(TodoRepositoryError::TaskNotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> TodoRepositoryResult<()> {
        let removed = self
            .tasks
            .remove(&id)
            .ok_or(TodoRepositoryError::TaskNotFound(id))?;
        remove_from_index(&mut self.task_index, removed.todo_id(), id);
        Ok(())
    }

    fn delete_tasks_by_todo(&mut self, todo_id: TodoId) -> TodoRepositoryResult<usize> {
        let ids = self.task_index.remove(&todo_id).unwrap_or_default();
        for id in &ids {
            self.tasks.remove(id);
        }
        Ok(ids.len())
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TodoTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TodoRepositoryError> + Send + 'static,
    {
        let mut live = self.state.write().map_err(|err| E::from(poisoned(&err)))?;
        let mut staged = live.clone();
        let output = work(&mut staged)?;
        *live = staged;
        Ok(output)
    }

    async fn read<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TodoReader) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TodoRepositoryError> + Send + 'static,
    {
        let live = self.state.read().map_err(|err| E::from(poisoned(&err)))?;
        work(&mut StateView(&live))
    }
}

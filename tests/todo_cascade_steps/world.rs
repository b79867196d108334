//! Shared world state for todo cascade BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use crate::test_helpers::ManualClock;
use rstest::fixture;
use todomate::{
    member::domain::MemberId,
    todo::{
        adapters::memory::InMemoryTodoRepository,
        domain::{TaskId, Todo},
        services::{TaskWriteService, TodoReadService, TodoServiceError, TodoWriteService},
    },
};

/// Scenario world for cascade behaviour tests.
pub struct TodoCascadeWorld {
    pub clock: Arc<ManualClock>,
    pub todos: TodoWriteService<InMemoryTodoRepository, ManualClock>,
    pub tasks: TaskWriteService<InMemoryTodoRepository, ManualClock>,
    pub reads: TodoReadService<InMemoryTodoRepository>,
    pub owner: MemberId,
    pub todo: Option<Todo>,
    pub task_ids: HashMap<String, TaskId>,
    pub last_result: Option<Result<(), TodoServiceError>>,
}

impl TodoCascadeWorld {
    /// Creates a world with fresh services and no todo.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTodoRepository::new());
        let clock = Arc::new(ManualClock::scenario_start());
        Self {
            todos: TodoWriteService::new(Arc::clone(&repository), Arc::clone(&clock)),
            tasks: TaskWriteService::new(Arc::clone(&repository), Arc::clone(&clock)),
            reads: TodoReadService::new(repository),
            clock,
            owner: MemberId::new(),
            todo: None,
            task_ids: HashMap::new(),
            last_result: None,
        }
    }

    /// Returns the scenario todo.
    ///
    /// # Errors
    ///
    /// Returns an error if no todo has been created yet.
    pub fn todo(&self) -> Result<&Todo, eyre::Report> {
        self.todo
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing todo in scenario world"))
    }

    /// Looks up a task created earlier in the scenario by its content.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has that content.
    pub fn task_id(&self, content: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(content)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task named {content:?} in scenario world"))
    }
}

impl Default for TodoCascadeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TodoCascadeWorld {
    TodoCascadeWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

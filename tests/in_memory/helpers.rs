//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use chrono::NaiveDate;
use rstest::fixture;
use todomate::{
    member::domain::MemberId,
    todo::{
        adapters::memory::InMemoryTodoRepository,
        domain::Todo,
        services::{CreateTodoRequest, TaskWriteService, TodoReadService, TodoWriteService},
    },
};

/// Todo services sharing one repository and one manual clock.
pub struct TodoServices {
    pub clock: Arc<ManualClock>,
    pub todos: TodoWriteService<InMemoryTodoRepository, ManualClock>,
    pub tasks: TaskWriteService<InMemoryTodoRepository, ManualClock>,
    pub reads: TodoReadService<InMemoryTodoRepository>,
}

impl TodoServices {
    /// Wires the services to `repository` and `clock`.
    pub fn new(repository: Arc<InMemoryTodoRepository>, clock: Arc<ManualClock>) -> Self {
        Self {
            todos: TodoWriteService::new(Arc::clone(&repository), Arc::clone(&clock)),
            tasks: TaskWriteService::new(Arc::clone(&repository), Arc::clone(&clock)),
            reads: TodoReadService::new(repository),
            clock,
        }
    }

    /// Creates a todo due at the end of 2025-12-01.
    ///
    /// # Errors
    ///
    /// Returns an error if the todo cannot be created.
    pub async fn create_report(&self, owner: MemberId) -> Result<Todo, eyre::Report> {
        let due = NaiveDate::from_ymd_opt(2025, 12, 1)
            .ok_or_else(|| eyre::eyre!("invalid report date"))?;
        let todo = self
            .todos
            .create(owner, CreateTodoRequest::new("Report").due_on(due))
            .await?;
        Ok(todo)
    }
}

/// Provides fresh services for each test.
#[fixture]
pub fn services() -> TodoServices {
    TodoServices::new(
        Arc::new(InMemoryTodoRepository::new()),
        Arc::new(ManualClock::scenario_start()),
    )
}

//! Shared fixtures for todo unit tests.

use crate::member::domain::MemberId;
use crate::todo::{
    adapters::memory::InMemoryTodoRepository,
    domain::{Deadline, Todo},
    services::{CreateTodoRequest, TaskWriteService, TodoReadService, TodoWriteService},
};
use chrono::NaiveDate;
use std::sync::Arc;

#[path = "../../../tests/test_helpers/clock.rs"]
mod clock;

pub use clock::{ManualClock, scenario_start_time as start_of_scenario};

pub fn clock_at_start() -> ManualClock {
    ManualClock::scenario_start()
}

/// Services wired to one in-memory repository and one manual clock.
pub struct Harness {
    pub repository: Arc<InMemoryTodoRepository>,
    pub clock: Arc<ManualClock>,
    pub todos: TodoWriteService<InMemoryTodoRepository, ManualClock>,
    pub tasks: TaskWriteService<InMemoryTodoRepository, ManualClock>,
    pub reads: TodoReadService<InMemoryTodoRepository>,
    pub owner: MemberId,
}

impl Harness {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTodoRepository::new());
        let clock = Arc::new(clock_at_start());
        Self {
            todos: TodoWriteService::new(Arc::clone(&repository), Arc::clone(&clock)),
            tasks: TaskWriteService::new(Arc::clone(&repository), Arc::clone(&clock)),
            reads: TodoReadService::new(Arc::clone(&repository)),
            repository,
            clock,
            owner: MemberId::new(),
        }
    }

    /// Creates the "Report" todo due at the end of 2025-12-01.
    pub async fn report(&self) -> Todo {
        self.todos
            .create(self.owner, CreateTodoRequest::new("Report").due_on(report_date()))
            .await
            .expect("create report")
    }
}

pub fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date")
}

pub fn report_deadline() -> Deadline {
    Deadline::end_of_day(report_date())
}

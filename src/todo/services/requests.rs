//! Request payloads for todo commands.

use crate::todo::domain::Deadline;
use chrono::NaiveDate;

/// Request payload for creating a todo.
///
/// The deadline is optional here so that a missing one surfaces as a
/// validation error from the domain rather than at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoRequest {
    pub(super) title: String,
    pub(super) deadline: Option<Deadline>,
}

impl CreateTodoRequest {
    /// Creates a request with a title and no deadline.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            deadline: None,
        }
    }

    /// Sets an exact deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the deadline to the end of `date`.
    #[must_use]
    pub fn due_on(self, date: NaiveDate) -> Self {
        self.with_deadline(Deadline::end_of_day(date))
    }
}

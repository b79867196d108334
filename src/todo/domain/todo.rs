//! Todo aggregate root.

use super::{CompletionStatus, Deadline, TodoDomainError, TodoId};
use crate::member::domain::MemberId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Titled, deadline-bound container of tasks owned by one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    id: TodoId,
    writer_id: MemberId,
    title: String,
    deadline: Deadline,
    status: CompletionStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoData {
    /// Persisted todo identifier.
    pub id: TodoId,
    /// Owning member.
    pub writer_id: MemberId,
    /// Persisted title.
    pub title: String,
    /// Persisted deadline.
    pub deadline: Deadline,
    /// Persisted completion status.
    pub status: CompletionStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, if complete.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Partial update for a todo.
///
/// `None` leaves a field unchanged; there is no way to clear a title or a
/// deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement deadline.
    pub deadline: Option<Deadline>,
}

impl TodoChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.deadline.is_none()
    }
}

impl Todo {
    /// Creates a new incomplete todo owned by `writer_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyTitle`] for a blank title,
    /// [`TodoDomainError::MissingDeadline`] when no deadline is given, or
    /// [`TodoDomainError::DeadlineInPast`] when the deadline precedes the
    /// creation time.
    pub fn new(
        writer_id: MemberId,
        title: impl Into<String>,
        deadline: Option<Deadline>,
        clock: &impl Clock,
    ) -> Result<Self, TodoDomainError> {
        let created_at = clock.utc();
        let validated_title = validated_title(title.into())?;
        let checked_deadline = deadline.ok_or(TodoDomainError::MissingDeadline)?;
        if checked_deadline.has_passed(created_at) {
            return Err(TodoDomainError::DeadlineInPast {
                deadline: checked_deadline,
                now: created_at,
            });
        }

        Ok(Self {
            id: TodoId::new(),
            writer_id,
            title: validated_title,
            deadline: checked_deadline,
            status: CompletionStatus::Incomplete,
            created_at,
            updated_at: created_at,
            completed_at: None,
        })
    }

    /// Reconstructs a todo from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTodoData) -> Self {
        Self {
            id: data.id,
            writer_id: data.writer_id,
            title: data.title,
            deadline: data.deadline,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the todo identifier.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the owning member.
    #[must_use]
    pub const fn writer_id(&self) -> MemberId {
        self.writer_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> CompletionStatus {
        self.status
    }

    /// Returns `true` when the todo is complete.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.status.is_complete()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the todo was completed, if it is complete.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` once the deadline has passed.
    #[must_use]
    pub fn is_frozen(&self, clock: &impl Clock) -> bool {
        self.deadline.has_passed(clock.utc())
    }

    /// Applies the present fields of `changes`.
    ///
    /// Every check runs before any field changes.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::CompletedTodoImmutable`] when complete,
    /// [`TodoDomainError::DeadlineExceeded`] when the current deadline has
    /// passed, [`TodoDomainError::EmptyTitle`] for a blank replacement title,
    /// or [`TodoDomainError::DeadlineInPast`] for a replacement deadline that
    /// is already over.
    pub fn update(
        &mut self,
        changes: TodoChanges,
        clock: &impl Clock,
    ) -> Result<(), TodoDomainError> {
        let now = clock.utc();
        if self.is_complete() {
            return Err(TodoDomainError::CompletedTodoImmutable(self.id));
        }
        self.ensure_open_at(now)?;

        let TodoChanges { title, deadline } = changes;
        let new_title = title.map(validated_title).transpose()?;
        if let Some(new_deadline) = deadline.filter(|candidate| candidate.has_passed(now)) {
            return Err(TodoDomainError::DeadlineInPast {
                deadline: new_deadline,
                now,
            });
        }

        if let Some(replacement) = new_title {
            self.title = replacement;
        }
        if let Some(replacement) = deadline {
            self.deadline = replacement;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Marks the todo complete.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::DeadlineExceeded`] when the deadline has
    /// passed or [`TodoDomainError::TodoAlreadyComplete`] when already
    /// complete.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TodoDomainError> {
        let now = clock.utc();
        self.ensure_open_at(now)?;
        if self.is_complete() {
            return Err(TodoDomainError::TodoAlreadyComplete(self.id));
        }
        self.status = CompletionStatus::Complete;
        self.completed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Reopens a completed todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::DeadlineExceeded`] when the deadline has
    /// passed or [`TodoDomainError::TodoNotComplete`] when not complete.
    pub fn incomplete(&mut self, clock: &impl Clock) -> Result<(), TodoDomainError> {
        let now = clock.utc();
        self.ensure_open_at(now)?;
        if !self.is_complete() {
            return Err(TodoDomainError::TodoNotComplete(self.id));
        }
        self.status = CompletionStatus::Incomplete;
        self.completed_at = None;
        self.updated_at = now;
        Ok(())
    }

    /// Checks that `member_id` owns this todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::NotOwner`] for any other member.
    pub fn validate_ownership(&self, member_id: MemberId) -> Result<(), TodoDomainError> {
        if self.writer_id != member_id {
            return Err(TodoDomainError::NotOwner {
                todo_id: self.id,
                member_id,
            });
        }
        Ok(())
    }

    /// Checks that the deadline has not passed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::DeadlineExceeded`] once the todo is frozen.
    pub fn ensure_open(&self, clock: &impl Clock) -> Result<(), TodoDomainError> {
        self.ensure_open_at(clock.utc())
    }

    /// Fails with [`TodoDomainError::DeadlineExceeded`] once the deadline is
    /// before `now`.
    pub(super) fn ensure_open_at(&self, now: DateTime<Utc>) -> Result<(), TodoDomainError> {
        if self.deadline.has_passed(now) {
            return Err(TodoDomainError::DeadlineExceeded {
                todo_id: self.id,
                deadline: self.deadline,
            });
        }
        Ok(())
    }
}

fn validated_title(raw: String) -> Result<String, TodoDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TodoDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

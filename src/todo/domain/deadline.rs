//! Todo deadline value type.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive upper bound on when a todo may still change.
///
/// A deadline has passed once `deadline < now`; the deadline instant itself
/// still counts as open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(DateTime<Utc>);

impl Deadline {
    /// Creates a deadline at an exact instant.
    #[must_use]
    pub const fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Creates a deadline at the last instant of `date` (UTC).
    #[must_use]
    pub fn end_of_day(date: NaiveDate) -> Self {
        let last_instant = date
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap_or_else(|| date.and_time(NaiveTime::MIN));
        Self(last_instant.and_utc())
    }

    /// Returns the deadline instant.
    #[must_use]
    pub const fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the calendar date of the deadline.
    #[must_use]
    pub fn date(self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Returns `true` when `now` is strictly after the deadline.
    #[must_use]
    pub fn has_passed(self, now: DateTime<Utc>) -> bool {
        self.0 < now
    }
}

impl From<DateTime<Utc>> for Deadline {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::at(instant)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

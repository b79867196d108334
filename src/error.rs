//! Caller-facing classification shared by every service error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of a service failure.
///
/// Surrounding layers (HTTP handlers, CLIs) map these onto their own status
/// codes without matching on every concrete error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input such as a blank title or a missing deadline.
    Validation,
    /// The operation was attempted after the governing deadline elapsed.
    DeadlineExceeded,
    /// Illegal status transition or mutation of a completed item.
    State,
    /// The acting member does not own the target.
    Authorization,
    /// A referenced record does not exist.
    NotFound,
    /// A task was addressed through a todo it does not belong to.
    Integrity,
    /// A uniqueness constraint rejected the request.
    Conflict,
    /// The backing store failed.
    Infrastructure,
}

impl ErrorKind {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::State => "state",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Integrity => "integrity",
            Self::Conflict => "conflict",
            Self::Infrastructure => "infrastructure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

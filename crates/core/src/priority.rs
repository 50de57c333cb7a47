//! Todo priority levels and due-date based derivation.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Hours-until-due at or below which a todo is `Urgent`.
pub const URGENT_WITHIN_HOURS: i64 = 24;

/// Hours-until-due at or below which a todo is `High`.
pub const HIGH_WITHIN_HOURS: i64 = 72;

/// Priority of a todo. Stored as a SMALLINT (`0..=3`), serialized by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Database representation.
    pub fn as_i16(self) -> i16 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Urgent => 3,
        }
    }

    /// Derive a priority from how close the due date is.
    ///
    /// Overdue todos count as due within 24 hours and are `Urgent`.
    pub fn from_due_date(due: Timestamp, now: Timestamp) -> Self {
        let remaining = due - now;
        if remaining <= Duration::hours(URGENT_WITHIN_HOURS) {
            Priority::Urgent
        } else if remaining <= Duration::hours(HIGH_WITHIN_HOURS) {
            Priority::High
        } else {
            Priority::Medium
        }
    }

    /// Pick the priority to store: an explicit choice wins, otherwise derive
    /// from the due date, otherwise fall back to the default.
    pub fn resolve(explicit: Option<Priority>, due: Option<Timestamp>, now: Timestamp) -> Self {
        match (explicit, due) {
            (Some(p), _) => p,
            (None, Some(due)) => Priority::from_due_date(due, now),
            (None, None) => Priority::default(),
        }
    }
}

impl TryFrom<i16> for Priority {
    type Error = CoreError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Priority::Low),
            1 => Ok(Priority::Medium),
            2 => Ok(Priority::High),
            3 => Ok(Priority::Urgent),
            other => Err(CoreError::Internal(format!(
                "Unknown priority value {other} in storage"
            ))),
        }
    }
}

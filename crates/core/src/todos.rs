//! Todo constants and rules: content, due dates and list views.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum length of todo content in characters.
pub const MIN_CONTENT_LENGTH: u64 = 3;

/// Maximum length of todo content in characters.
pub const MAX_CONTENT_LENGTH: u64 = 200;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate todo content: not blank and within the length bounds.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Todo content is required".to_string()));
    }
    let len = content.chars().count() as u64;
    if !(MIN_CONTENT_LENGTH..=MAX_CONTENT_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Todo must be between {MIN_CONTENT_LENGTH}-{MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// A newly set due date must lie strictly in the future.
pub fn validate_due_date(due: Timestamp, now: Timestamp) -> Result<(), CoreError> {
    if due <= now {
        return Err(CoreError::Validation(
            "Due date must be in the future".to_string(),
        ));
    }
    Ok(())
}

/// Validate the due date of an update.
///
/// An unchanged due date is accepted even if it has passed since it was set,
/// so that editing the content of an overdue todo keeps working.
pub fn validate_due_date_change(
    current: Option<Timestamp>,
    requested: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), CoreError> {
    match requested {
        Some(due) if Some(due) != current => validate_due_date(due, now),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Due date parsing
// ---------------------------------------------------------------------------

/// Parse a due date into UTC.
///
/// RFC 3339 values are converted from their offset. Values without an offset
/// (`2026-03-10T17:30`, `2026-03-10T17:30:00.000`, `2026-03-10`) are taken
/// to already be UTC.
pub fn parse_due_date(raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(CoreError::Validation(format!("Invalid due date '{raw}'")))
}

/// Serde adapter for optional due dates; `null` and blank strings mean "none".
pub fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| parse_due_date(&s).map_err(serde::de::Error::custom))
        .transpose()
}

// ---------------------------------------------------------------------------
// List views
// ---------------------------------------------------------------------------

/// The caller-scoped list views over non-deleted todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoView {
    All,
    Completed,
    Pending,
    /// Todos due on the current UTC calendar day.
    Today,
}

/// Half-open `[start, end)` bounds of the UTC calendar day containing `now`.
pub fn utc_day_bounds(now: Timestamp) -> (Timestamp, Timestamp) {
    let start = now
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc();
    (start, start + Duration::days(1))
}

/// Whether `due` falls on the same UTC calendar day as `now`.
pub fn is_due_today(due: Timestamp, now: Timestamp) -> bool {
    let (start, end) = utc_day_bounds(now);
    start <= due && due < end
}

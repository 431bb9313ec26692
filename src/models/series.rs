//! Recurring shift-series request types.
//!
//! A series request is ephemeral: it is constructed per submission and only
//! its expansion (individual shift rows) is persisted.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cadence of a recurring series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// Every selected week.
    Weekly,
    /// Every second week.
    Fortnightly,
}

impl Recurrence {
    /// Number of calendar days between successive selected weeks.
    pub fn week_step_days(self) -> i64 {
        match self {
            Recurrence::Weekly => 7,
            Recurrence::Fortnightly => 14,
        }
    }
}

/// Termination rule for a recurring series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum Termination {
    /// Stop after at most this many occurrences.
    Count(u32),
    /// Stop once an occurrence's date would exceed this boundary (inclusive).
    Until(NaiveDate),
}

/// A validated recurring shift-series request.
///
/// `weekdays` is expected to be deduplicated by the caller; the expander
/// emits one occurrence per entry and performs no deduplication itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSeries {
    /// Human-readable title copied onto each generated shift.
    pub title: String,
    /// Start of the anchor occurrence; no occurrence starts before this.
    pub start: NaiveDateTime,
    /// End of the anchor occurrence. Defaults to `start + 8h` when absent.
    pub end: Option<NaiveDateTime>,
    /// Selected weekdays.
    pub weekdays: Vec<Weekday>,
    /// Weekly or fortnightly cadence.
    pub recurrence: Recurrence,
    /// Count- or date-based termination.
    pub termination: Termination,
    /// Optional support worker assigned to every generated shift.
    pub user_id: Option<Uuid>,
    /// Optional client attached to every generated shift.
    pub client_id: Option<Uuid>,
}

impl ShiftSeries {
    /// Default occurrence length applied when no end time is given.
    pub const DEFAULT_DURATION_HOURS: i64 = 8;

    /// Returns the effective end of the anchor occurrence.
    pub fn effective_end(&self) -> NaiveDateTime {
        self.end
            .unwrap_or(self.start + chrono::Duration::hours(Self::DEFAULT_DURATION_HOURS))
    }

    /// Returns the occurrence duration (effective end minus start).
    pub fn duration(&self) -> chrono::Duration {
        self.effective_end() - self.start
    }
}

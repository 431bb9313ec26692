//! Shift model and related types.
//!
//! This module defines the persisted shift row. One `ShiftInstance` is
//! created per occurrence expanded from a recurring series; instances are
//! independent after creation and reference their originating series only
//! through a shared tag string.

use chrono::{Datelike, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a shift row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// The shift is rostered but has not yet been worked.
    Scheduled,
    /// The shift has been worked and its budget deduction attempted.
    Completed,
}

/// A single persisted shift row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftInstance {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The tenant that owns this shift.
    pub tenant_id: Uuid,
    /// Human-readable title, carried from the series request.
    pub title: String,
    /// The start time of the shift.
    pub start_time: NaiveDateTime,
    /// The end time of the shift.
    pub end_time: NaiveDateTime,
    /// The support worker assigned to the shift, if any.
    pub user_id: Option<Uuid>,
    /// The client receiving support, if any.
    pub client_id: Option<Uuid>,
    /// Free-text tag shared by all shifts expanded from one series request.
    pub series_tag: String,
    /// Weekday label recorded at creation time (e.g. "Monday").
    pub weekday_label: String,
    /// Lifecycle state.
    pub status: ShiftStatus,
}

impl ShiftInstance {
    /// Calculates the elapsed hours between the shift's start and end.
    ///
    /// Duration is measured in whole minutes and converted to fractional
    /// hours, so a 7.5 hour shift reports exactly `7.5`.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{ShiftInstance, ShiftStatus};
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let shift = ShiftInstance {
    ///     id: Uuid::new_v4(),
    ///     tenant_id: Uuid::new_v4(),
    ///     title: "Community access".to_string(),
    ///     start_time: NaiveDateTime::parse_from_str("2024-01-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end_time: NaiveDateTime::parse_from_str("2024-01-01 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     user_id: None,
    ///     client_id: None,
    ///     series_tag: "series_abc".to_string(),
    ///     weekday_label: "Monday".to_string(),
    ///     status: ShiftStatus::Scheduled,
    /// };
    /// assert_eq!(shift.duration_hours(), Decimal::new(80, 1)); // 8.0 hours
    /// ```
    pub fn duration_hours(&self) -> Decimal {
        let minutes = (self.end_time - self.start_time).num_minutes();
        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }

    /// Returns the day of the week of the shift's start.
    pub fn weekday(&self) -> Weekday {
        self.start_time.date().weekday()
    }
}

/// Returns the English label for a weekday (e.g. "Monday").
///
/// Used to stamp `weekday_label` on generated shift rows.
pub(crate) fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

//! Request types for the rostering engine API.
//!
//! This module defines the JSON request structures and their conversion
//! into validated domain types.

use chrono::{NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RosterError, RosterResult};
use crate::models::{FundingCategory, Recurrence, ShiftSeries, Termination};
use crate::rostering::StaffingRatio;

/// Cap on count-based termination, roughly a year of daily shifts.
pub const MAX_SERIES_OCCURRENCES: u32 = 366;

/// Request body for `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// The user to mint a session for.
    pub user_id: Uuid,
}

/// Request body for `POST /clients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientRequest {
    /// Full name.
    pub name: String,
    /// NDIS participant number, if known.
    #[serde(default)]
    pub ndis_number: Option<String>,
}

/// Request body for `PUT /clients/:id/budgets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertBudgetRequest {
    /// The funding category to set.
    pub category: FundingCategory,
    /// The remaining balance in dollars.
    pub remaining: Decimal,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for `POST /shift-series`.
///
/// Weekdays are accepted as names ("Monday" or "Mon", case-insensitive)
/// and deduplicated before expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSeriesRequest {
    /// Human-readable title copied onto each generated shift.
    pub title: String,
    /// Start of the anchor occurrence.
    pub start: NaiveDateTime,
    /// End of the anchor occurrence; defaults to eight hours after start.
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    /// Selected weekday names.
    pub weekdays: Vec<String>,
    /// Weekly or fortnightly cadence.
    pub recurrence: Recurrence,
    /// Count- or date-based termination.
    pub termination: Termination,
    /// Optional support worker assigned to every generated shift.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Optional client attached to every generated shift.
    #[serde(default)]
    pub client_id: Option<Uuid>,
}

impl CreateSeriesRequest {
    /// Validates the request and converts it into a domain series.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidSeries`] for an empty title, an
    /// unrecognised weekday name, an end that does not follow the start,
    /// or a count above [`MAX_SERIES_OCCURRENCES`].
    pub fn into_series(self) -> RosterResult<ShiftSeries> {
        if self.title.trim().is_empty() {
            return Err(RosterError::InvalidSeries {
                message: "title must not be empty".to_string(),
            });
        }

        if let Some(end) = self.end {
            if end <= self.start {
                return Err(RosterError::InvalidSeries {
                    message: "end time must be after start time".to_string(),
                });
            }
        }

        if let Termination::Count(count) = self.termination {
            if count > MAX_SERIES_OCCURRENCES {
                return Err(RosterError::InvalidSeries {
                    message: format!(
                        "occurrence count {} exceeds the maximum of {}",
                        count, MAX_SERIES_OCCURRENCES
                    ),
                });
            }
        }

        let mut weekdays = Vec::with_capacity(self.weekdays.len());
        for name in &self.weekdays {
            let weekday: Weekday =
                name.parse()
                    .map_err(|_| RosterError::InvalidSeries {
                        message: format!("unrecognised weekday '{}'", name),
                    })?;
            // Dedup here; the expander emits per entry by contract.
            if !weekdays.contains(&weekday) {
                weekdays.push(weekday);
            }
        }

        Ok(ShiftSeries {
            title: self.title,
            start: self.start,
            end: self.end,
            weekdays,
            recurrence: self.recurrence,
            termination: self.termination,
            user_id: self.user_id,
            client_id: self.client_id,
        })
    }
}

/// Request body for `POST /shifts/:id/complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteShiftRequest {
    /// Staffing ratio worked, used for the rate lookup.
    pub ratio: StaffingRatio,
    /// Optional activity note recorded on the ledger entry.
    #[serde(default)]
    pub note: Option<String>,
}

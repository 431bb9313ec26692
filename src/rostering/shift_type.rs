//! Shift-type band detection.
//!
//! This module classifies a shift into its NDIS rate band from the start
//! hour and maps each band onto the funding category it draws from.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::models::FundingCategory;

/// NDIS rate band of a shift, derived from the start hour.
///
/// # Example
///
/// ```
/// use roster_engine::rostering::ShiftType;
///
/// let band = ShiftType::Evening;
/// assert_eq!(format!("{:?}", band), "Evening");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// Starts 06:00-17:59.
    Day,
    /// Starts 18:00-21:59.
    Evening,
    /// Starts 00:00-05:59 (active overnight).
    Night,
    /// Starts 22:00-23:59 (overnight sleepover).
    Sleepover,
}

impl ShiftType {
    /// The key used for this band in rate configuration files.
    pub fn code(self) -> &'static str {
        match self {
            ShiftType::Day => "day",
            ShiftType::Evening => "evening",
            ShiftType::Night => "night",
            ShiftType::Sleepover => "sleepover",
        }
    }

    /// The funding category this band draws its cost from.
    ///
    /// Day and evening shifts draw from community access; night and
    /// sleepover shifts draw from supported independent living.
    pub fn funding_category(self) -> FundingCategory {
        match self {
            ShiftType::Day | ShiftType::Evening => FundingCategory::CommunityAccess,
            ShiftType::Night | ShiftType::Sleepover => FundingCategory::Sil,
        }
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Determines the rate band for a shift from its start time.
///
/// # Example
///
/// ```
/// use roster_engine::rostering::{classify_shift, ShiftType};
/// use chrono::NaiveDateTime;
///
/// let morning = NaiveDateTime::parse_from_str("2024-01-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(classify_shift(morning), ShiftType::Day);
///
/// let late = NaiveDateTime::parse_from_str("2024-01-01 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(classify_shift(late), ShiftType::Sleepover);
/// ```
pub fn classify_shift(start: NaiveDateTime) -> ShiftType {
    match start.hour() {
        6..=17 => ShiftType::Day,
        18..=21 => ShiftType::Evening,
        22..=23 => ShiftType::Sleepover,
        _ => ShiftType::Night,
    }
}

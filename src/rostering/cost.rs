//! Shift costing against the NDIS rate schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SchemeLoader;
use crate::error::RosterResult;
use crate::models::{FundingCategory, ShiftInstance};

use super::shift_type::{ShiftType, classify_shift};

/// Staffing ratio of workers to clients on a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffingRatio {
    /// One worker to one client.
    OneToOne,
    /// Two workers to one client.
    TwoToOne,
    /// One worker shared between two clients.
    OneToTwo,
    /// One worker shared between three clients.
    OneToThree,
}

impl StaffingRatio {
    /// The key used for this ratio in rate configuration files.
    pub fn code(self) -> &'static str {
        match self {
            StaffingRatio::OneToOne => "one_to_one",
            StaffingRatio::TwoToOne => "two_to_one",
            StaffingRatio::OneToTwo => "one_to_two",
            StaffingRatio::OneToThree => "one_to_three",
        }
    }
}

impl std::fmt::Display for StaffingRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The costed breakdown of a completed shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftCost {
    /// The rate band the shift fell into.
    pub shift_type: ShiftType,
    /// The funding category the cost draws from.
    pub category: FundingCategory,
    /// Elapsed hours.
    pub hours: Decimal,
    /// Hourly rate applied.
    pub rate: Decimal,
    /// Total cost (`rate` x `hours`).
    pub amount: Decimal,
}

/// Costs a shift: classifies it from the start hour, looks up the hourly
/// rate effective on the shift date for the staffing ratio, and multiplies
/// by the elapsed hours.
///
/// # Errors
///
/// Returns [`RosterError::RateNotFound`] when the schedule has no rate for
/// the band/ratio combination effective on the shift date.
///
/// [`RosterError::RateNotFound`]: crate::error::RosterError::RateNotFound
pub fn calculate_shift_cost(
    shift: &ShiftInstance,
    ratio: StaffingRatio,
    scheme: &SchemeLoader,
) -> RosterResult<ShiftCost> {
    let shift_type = classify_shift(shift.start_time);
    let rate = scheme.get_hourly_rate(shift_type, ratio, shift.start_time.date())?;
    let hours = shift.duration_hours();

    Ok(ShiftCost {
        shift_type,
        category: shift_type.funding_category(),
        hours,
        rate,
        amount: rate * hours,
    })
}

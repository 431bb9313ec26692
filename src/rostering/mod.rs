//! Rostering logic for the engine.
//!
//! This module contains the pure domain functions: expanding a recurring
//! weekday pattern into concrete shift occurrences, classifying a shift into
//! its NDIS rate band from the start hour, and costing a completed shift
//! against the rate schedule.

mod cost;
mod expander;
mod shift_type;

pub use cost::{ShiftCost, StaffingRatio, calculate_shift_cost};
pub use expander::{ShiftOccurrence, expand_series};
pub use shift_type::{ShiftType, classify_shift};

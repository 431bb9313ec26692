//! Domain models for the rostering engine.

mod budget;
mod client;
mod series;
mod shift;
mod user;

pub use budget::{BudgetLedgerEntry, FundingCategory};
pub use client::Client;
pub use series::{Recurrence, ShiftSeries, Termination};
pub use shift::{ShiftInstance, ShiftStatus};
pub(crate) use shift::weekday_label;
pub use user::{Permission, Role, Session, User};

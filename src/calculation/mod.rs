//! Calculation logic for the Salary Ledger.
//!
//! This module contains the pure functions behind salary generation:
//! worked hours for an attendance day, monthly hour aggregation, and the
//! pay policies that turn hours into a payable amount.

mod pay_policy;
mod worked_hours;

pub use pay_policy::{MONEY_SCALE, PayComputation, PayInputs, PayPolicy, hourly_rate};
pub use worked_hours::{HOURS_SCALE, hours_between, total_worked_hours};

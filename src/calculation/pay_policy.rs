//! Salary pro-ration policies.
//!
//! A [`PayPolicy`] maps a month's worked hours and an employee's monthly
//! base salary to a payable amount.
//!
//! # Hours-proportional (default)
//!
//! ```text
//! hourly_rate  = round(monthly_salary / (days_in_month * standard_daily_hours), 2)
//! total_salary = round(total_hours * hourly_rate, 2)
//! ```
//!
//! The rate is rounded before multiplying, so the total is exactly what a
//! payslip reader gets from `hours * rate` as displayed.
//!
//! # Flat
//!
//! The full monthly salary is payable regardless of hours. The hourly rate is
//! still computed with the formula above, for display only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::MonthKey;

/// Decimal places kept for money.
pub const MONEY_SCALE: u32 = 2;

/// How worked hours map to a payable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPolicy {
    /// Pay worked hours at a rate derived from standard working hours.
    #[default]
    HoursProportional,
    /// Pay the full monthly salary.
    Flat,
}

/// Inputs to a pay computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayInputs {
    /// The payroll month; its length sets the number of standard days.
    pub month: MonthKey,
    /// Total hours worked in the month.
    pub total_hours: Decimal,
    /// The employee's monthly base salary.
    pub monthly_salary: Decimal,
    /// Standard working hours per calendar day.
    pub standard_daily_hours: Decimal,
}

/// Result of a pay computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayComputation {
    /// Hourly rate snapshot.
    pub hourly_rate: Decimal,
    /// Payable amount.
    pub total_salary: Decimal,
}

/// Derives the hourly rate for a month.
///
/// Returns zero when the divisor is zero.
///
/// # Errors
///
/// `Validation` on `monthly_salary` when the rate does not fit in a
/// `Decimal`.
///
/// # Examples
///
/// ```
/// use salary_ledger::calculation::hourly_rate;
/// use rust_decimal::Decimal;
///
/// let month = "2024-06".parse().unwrap(); // 30 days
/// let rate = hourly_rate(month, Decimal::new(24000, 0), Decimal::new(16, 0)).unwrap();
/// assert_eq!(rate, Decimal::new(5000, 2)); // 24000 / 480 = 50.00
/// ```
pub fn hourly_rate(
    month: MonthKey,
    monthly_salary: Decimal,
    standard_daily_hours: Decimal,
) -> LedgerResult<Decimal> {
    let divisor = Decimal::from(month.days_in_month())
        .checked_mul(standard_daily_hours)
        .ok_or_else(|| overflow("standard_daily_hours", standard_daily_hours))?;
    if divisor.is_zero() {
        return Ok(Decimal::ZERO);
    }
    monthly_salary
        .checked_div(divisor)
        .map(|rate| rate.round_dp(MONEY_SCALE))
        .ok_or_else(|| overflow("monthly_salary", monthly_salary))
}

fn overflow(field: &str, value: Decimal) -> LedgerError {
    LedgerError::validation(
        field,
        format!("{value} is out of range for salary computation"),
    )
}

impl PayPolicy {
    /// Computes the rate snapshot and payable amount.
    ///
    /// Fails with `Validation` instead of overflowing when the inputs are
    /// too large to represent.
    pub fn compute(&self, inputs: &PayInputs) -> LedgerResult<PayComputation> {
        let rate = hourly_rate(
            inputs.month,
            inputs.monthly_salary,
            inputs.standard_daily_hours,
        )?;

        let total_salary = match self {
            PayPolicy::HoursProportional => inputs
                .total_hours
                .checked_mul(rate)
                .ok_or_else(|| overflow("monthly_salary", inputs.monthly_salary))?
                .round_dp(MONEY_SCALE),
            PayPolicy::Flat => inputs.monthly_salary.round_dp(MONEY_SCALE),
        };

        Ok(PayComputation {
            hourly_rate: rate,
            total_salary,
        })
    }
}

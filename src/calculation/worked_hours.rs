//! Worked hours calculation.
//!
//! This module derives the hours for a single attendance day and aggregates
//! a month of attendance into a salary total.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::AttendanceRecord;

/// Decimal places kept for worked hours.
pub const HOURS_SCALE: u32 = 2;

const SECONDS_PER_HOUR: i64 = 3600;

/// Calculates hours between check-in and check-out on the same day.
///
/// The result is rounded to [`HOURS_SCALE`] decimal places. A check-out
/// earlier than the check-in is rejected; overnight attendance is not
/// represented by a single record.
///
/// # Examples
///
/// ```
/// use salary_ledger::calculation::hours_between;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let hours = hours_between(
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
/// ).unwrap();
/// assert_eq!(hours, Decimal::new(45, 1)); // 4.5 hours
/// ```
pub fn hours_between(check_in: NaiveTime, check_out: NaiveTime) -> LedgerResult<Decimal> {
    if check_out < check_in {
        return Err(LedgerError::validation(
            "check_out",
            format!("check-out {check_out} is earlier than check-in {check_in}"),
        ));
    }

    let seconds = (check_out - check_in).num_seconds();
    Ok((Decimal::new(seconds, 0) / Decimal::new(SECONDS_PER_HOUR, 0)).round_dp(HOURS_SCALE))
}

/// Sums worked hours over a set of attendance records.
///
/// Records still missing a check-out contribute zero.
pub fn total_worked_hours<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    records
        .into_iter()
        .filter(|r| r.is_complete())
        .map(|r| r.worked_hours)
        .sum()
}

//! Attendance record model.
//!
//! One [`AttendanceRecord`] exists per employee per calendar date. It is
//! created on check-in and completed on check-out.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// A single day of attendance for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: EmployeeId,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Time of check-in, if it has happened.
    pub check_in: Option<NaiveTime>,
    /// Time of check-out, if it has happened.
    pub check_out: Option<NaiveTime>,
    /// Hours between check-in and check-out, rounded to 2 decimal places.
    pub worked_hours: Decimal,
}

impl AttendanceRecord {
    /// Creates a record for a fresh check-in.
    pub fn checked_in(employee_id: EmployeeId, date: NaiveDate, at: NaiveTime) -> Self {
        Self {
            employee_id,
            date,
            check_in: Some(at),
            check_out: None,
            worked_hours: Decimal::ZERO,
        }
    }

    /// Returns true once both check-in and check-out are recorded.
    pub fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }
}

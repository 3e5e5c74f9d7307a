//! Salary record model.
//!
//! This module contains the [`SalaryRecord`] type, the single persisted
//! payroll snapshot for one employee and one month.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, MonthKey};

/// Monthly salary snapshot, unique per (employee, month).
///
/// # Example
///
/// ```
/// use salary_ledger::models::SalaryRecord;
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let record = SalaryRecord {
///     employee_id: 1,
///     month: "2024-06".parse().unwrap(),
///     total_hours: Decimal::new(125, 1),
///     hourly_rate: Decimal::new(5000, 2),
///     total_salary: Decimal::new(62500, 2),
///     locked: true,
///     generated_at: Utc::now(),
/// };
/// assert_eq!(record.month.to_string(), "2024-06");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// The employee this record belongs to.
    pub employee_id: EmployeeId,
    /// The payroll month.
    pub month: MonthKey,
    /// Sum of worked hours across the month's attendance.
    pub total_hours: Decimal,
    /// Hourly rate used at generation time.
    pub hourly_rate: Decimal,
    /// Payable amount.
    pub total_salary: Decimal,
    /// Set on generation; only override roles may edit a locked record.
    pub locked: bool,
    /// When the record was generated.
    pub generated_at: DateTime<Utc>,
}

/// Outcome tag of a generate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerateStatus {
    /// A new record was created.
    New,
    /// A record already existed and was returned unchanged.
    Exists,
    /// The request was rejected.
    Error,
}

/// Result of generating a salary record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Whether the record is new or pre-existing.
    pub status: GenerateStatus,
    /// The stored record.
    pub record: SalaryRecord,
}

/// Result of updating a salary record's amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryUpdate {
    /// The record after the update.
    pub record: SalaryRecord,
    /// True when the record was locked and an override role edited it.
    pub overridden: bool,
}

//! Salary ledger: generation, lookup and lock-aware updates.
//!
//! A salary record moves through a single state:
//!
//! ```text
//! absent --Generate--> locked --Update by override role--> locked
//!    ^                                                        |
//!    +------------------ employee cascade delete -------------+
//! ```
//!
//! Generate is idempotent: once a record exists for (employee, month) it is
//! returned unchanged and never recomputed. The store performs the insert
//! as a compare-and-set on that key, so a concurrent duplicate resolves to
//! the record that won.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{MONEY_SCALE, PayInputs, PayPolicy, total_worked_hours};
use crate::config::AccessPolicy;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    EmployeeId, GenerateStatus, Generated, MonthKey, SalaryRecord, SalaryUpdate,
};
use crate::store::{AttendanceStore, DirectoryStore, Insertion, SalaryStore};

use super::Settings;

/// The salary ledger service.
#[derive(Clone)]
pub struct SalaryLedger {
    directory: Arc<dyn DirectoryStore>,
    attendance: Arc<dyn AttendanceStore>,
    salaries: Arc<dyn SalaryStore>,
    settings: Arc<Settings>,
    access: AccessPolicy,
    policy: PayPolicy,
}

impl SalaryLedger {
    /// Creates a ledger over the given stores.
    pub fn new(
        directory: Arc<dyn DirectoryStore>,
        attendance: Arc<dyn AttendanceStore>,
        salaries: Arc<dyn SalaryStore>,
        settings: Arc<Settings>,
        access: AccessPolicy,
        policy: PayPolicy,
    ) -> Self {
        Self {
            directory,
            attendance,
            salaries,
            settings,
            access,
            policy,
        }
    }

    /// Generates the salary record for an employee and month.
    ///
    /// Returns [`GenerateStatus::New`] with the freshly locked record, or
    /// [`GenerateStatus::Exists`] with the stored record untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidMonth` if `month` is not `YYYY-MM`
    /// - `EmployeeNotFound` if the employee does not exist
    pub fn generate(
        &self,
        employee_id: EmployeeId,
        month: &str,
        role: &str,
    ) -> LedgerResult<Generated> {
        let month: MonthKey = month.parse()?;
        let employee = self
            .directory
            .get_employee(employee_id)
            .ok_or(LedgerError::EmployeeNotFound { employee_id })?;

        if let Some(existing) = self.salaries.get_salary(employee_id, month) {
            info!(employee_id, month = %month, role, "Salary already generated");
            return Ok(Generated {
                status: GenerateStatus::Exists,
                record: existing,
            });
        }

        let records = self.attendance.list_attendance_in_month(employee_id, month);
        let total_hours = total_worked_hours(&records);
        let standard_daily_hours = self.settings.daily_hours();
        let pay = self.policy.compute(&PayInputs {
            month,
            total_hours,
            monthly_salary: employee.monthly_salary,
            standard_daily_hours,
        })?;

        let candidate = SalaryRecord {
            employee_id,
            month,
            total_hours,
            hourly_rate: pay.hourly_rate,
            total_salary: pay.total_salary,
            locked: true,
            generated_at: Utc::now(),
        };

        match self.salaries.insert_salary_if_absent(candidate)? {
            Insertion::Inserted(record) => {
                info!(
                    employee_id,
                    month = %month,
                    role,
                    days = records.len(),
                    total_hours = %record.total_hours,
                    hourly_rate = %record.hourly_rate,
                    total_salary = %record.total_salary,
                    policy = ?self.policy,
                    "Salary generated"
                );
                Ok(Generated {
                    status: GenerateStatus::New,
                    record,
                })
            }
            Insertion::Existing(record) => {
                info!(employee_id, month = %month, role, "Concurrent generation resolved to existing record");
                Ok(Generated {
                    status: GenerateStatus::Exists,
                    record,
                })
            }
        }
    }

    /// Looks up a generated record.
    ///
    /// A missing record is reported as `SalaryNotFound`, the expected answer
    /// before the month has been generated.
    pub fn view(&self, employee_id: EmployeeId, month: &str) -> LedgerResult<SalaryRecord> {
        let month: MonthKey = month.parse()?;
        self.salaries
            .get_salary(employee_id, month)
            .ok_or(LedgerError::SalaryNotFound { employee_id, month })
    }

    /// Replaces the payable amount of a generated record.
    ///
    /// Unlocked records accept any caller. Locked records accept only roles
    /// in the override set; the lock stays set either way and hours are not
    /// recomputed.
    pub fn update(
        &self,
        employee_id: EmployeeId,
        month: &str,
        amount: Decimal,
        role: &str,
    ) -> LedgerResult<SalaryUpdate> {
        let month: MonthKey = month.parse()?;
        if amount < Decimal::ZERO {
            return Err(LedgerError::validation(
                "total_salary",
                "must not be negative",
            ));
        }
        let amount = amount.round_dp(MONEY_SCALE);

        let mut overridden = false;
        let mut previous = Decimal::ZERO;
        let outcome = self
            .salaries
            .modify_salary(employee_id, month, &mut |record| {
                if record.locked {
                    if !self.access.can_override_lock(role) {
                        return Err(LedgerError::unauthorized(
                            role,
                            format!("salary for {month} is locked"),
                        ));
                    }
                    overridden = true;
                }
                previous = record.total_salary;
                record.total_salary = amount;
                Ok(())
            })
            .ok_or(LedgerError::SalaryNotFound { employee_id, month });

        let record = match outcome.and_then(|r| r) {
            Ok(record) => record,
            Err(err) => {
                warn!(employee_id, month = %month, role, error = %err, "Salary update rejected");
                return Err(err);
            }
        };

        if overridden {
            warn!(
                employee_id,
                month = %month,
                role,
                previous = %previous,
                total_salary = %record.total_salary,
                "Locked salary updated via override"
            );
        } else {
            info!(
                employee_id,
                month = %month,
                role,
                previous = %previous,
                total_salary = %record.total_salary,
                "Salary updated"
            );
        }

        Ok(SalaryUpdate { record, overridden })
    }
}

//! Attendance check-in and check-out.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::info;

use crate::calculation::hours_between;
use crate::config::AccessPolicy;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AttendanceRecord, EmployeeId};
use crate::store::{AttendanceStore, DirectoryStore};

/// A check-in or check-out request.
///
/// `date` and `time` default to the current local date and time. Supplying
/// either requires a privileged role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Punch {
    /// The employee punching in or out.
    pub employee_id: EmployeeId,
    /// The role of the caller recording the punch.
    pub role: String,
    /// Manual date.
    pub date: Option<NaiveDate>,
    /// Manual time.
    pub time: Option<NaiveTime>,
}

/// Records attendance against the directory.
#[derive(Clone)]
pub struct AttendanceBook {
    directory: Arc<dyn DirectoryStore>,
    attendance: Arc<dyn AttendanceStore>,
    access: AccessPolicy,
}

impl AttendanceBook {
    /// Creates an attendance book over the given stores.
    pub fn new(
        directory: Arc<dyn DirectoryStore>,
        attendance: Arc<dyn AttendanceStore>,
        access: AccessPolicy,
    ) -> Self {
        Self {
            directory,
            attendance,
            access,
        }
    }

    /// Resolves the punch date and time, enforcing the manual-entry rule.
    fn resolve(&self, punch: &Punch, now: NaiveDateTime) -> LedgerResult<(NaiveDate, NaiveTime)> {
        if (punch.date.is_some() || punch.time.is_some())
            && !self.access.can_set_manual_time(&punch.role)
        {
            return Err(LedgerError::unauthorized(
                &punch.role,
                "only privileged roles can set a manual date or time",
            ));
        }
        if self.directory.get_employee(punch.employee_id).is_none() {
            return Err(LedgerError::EmployeeNotFound {
                employee_id: punch.employee_id,
            });
        }

        // Whole seconds only.
        let now_time = now.time().with_nanosecond(0).unwrap_or(now.time());
        Ok((
            punch.date.unwrap_or(now.date()),
            punch.time.unwrap_or(now_time),
        ))
    }

    /// Opens the attendance record for a day.
    pub fn check_in(&self, punch: &Punch, now: NaiveDateTime) -> LedgerResult<AttendanceRecord> {
        let (date, time) = self.resolve(punch, now)?;
        let record = self.attendance.insert_attendance(AttendanceRecord::checked_in(
            punch.employee_id,
            date,
            time,
        ))?;
        info!(
            employee_id = punch.employee_id,
            date = %date,
            check_in = %time,
            manual = punch.date.is_some() || punch.time.is_some(),
            "Checked in"
        );
        Ok(record)
    }

    /// Closes the attendance record for a day and derives worked hours.
    pub fn check_out(&self, punch: &Punch, now: NaiveDateTime) -> LedgerResult<AttendanceRecord> {
        let (date, time) = self.resolve(punch, now)?;
        let record = self
            .attendance
            .modify_attendance(punch.employee_id, date, &mut |record| {
                if record.check_out.is_some() {
                    return Err(LedgerError::conflict(format!(
                        "employee {} already checked out on {}",
                        record.employee_id, record.date
                    )));
                }
                let check_in = record.check_in.ok_or(LedgerError::AttendanceNotFound {
                    employee_id: record.employee_id,
                    date: record.date,
                })?;
                record.worked_hours = hours_between(check_in, time)?;
                record.check_out = Some(time);
                Ok(())
            })
            .map_err(|err| match err {
                LedgerError::AttendanceNotFound { employee_id, date } => LedgerError::validation(
                    "check_in",
                    format!("no check-in found for employee {employee_id} on {date}"),
                ),
                other => other,
            })?;
        info!(
            employee_id = punch.employee_id,
            date = %date,
            check_out = %time,
            worked_hours = %record.worked_hours,
            "Checked out"
        );
        Ok(record)
    }

    /// Lists an employee's attendance, most recent first.
    pub fn history(&self, employee_id: EmployeeId) -> LedgerResult<Vec<AttendanceRecord>> {
        if self.directory.get_employee(employee_id).is_none() {
            return Err(LedgerError::EmployeeNotFound { employee_id });
        }
        let mut records = self.attendance.list_attendance(employee_id);
        records.reverse();
        Ok(records)
    }
}

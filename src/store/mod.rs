//! Storage traits for the Salary Ledger.
//!
//! The ledger consumes three stores (directory, attendance, salary) and the
//! user directory. Each is a trait so that a persistent backend can replace
//! [`MemoryStore`]. Mutations are expressed as check-and-modify closures that
//! the store runs under its own lock, so a rejected closure leaves the stored
//! value untouched and no caller can act on a stale read.

mod memory;
#[cfg(test)]
pub(crate) mod testing;

use chrono::NaiveDate;

use crate::error::LedgerResult;
use crate::models::{
    AttendanceRecord, Employee, EmployeeId, MonthKey, SalaryRecord, User, UserId,
};

pub use memory::MemoryStore;

/// Closure applied to a stored value under the store's write lock.
///
/// Returning an error aborts the change.
pub type Mutation<'a, T> = &'a mut dyn FnMut(&mut T) -> LedgerResult<()>;

/// Outcome of an atomic insert keyed by (employee, month).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// The record was stored.
    Inserted(SalaryRecord),
    /// A record already existed; it is returned unchanged.
    Existing(SalaryRecord),
}

/// Counts of records removed by an employee cascade delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    /// Attendance records removed.
    pub attendance_removed: usize,
    /// Salary records removed.
    pub salaries_removed: usize,
}

/// Employee directory.
pub trait DirectoryStore: Send + Sync {
    /// Stores an employee, replacing its `id` with a newly assigned one.
    fn insert_employee(&self, employee: Employee) -> Employee;

    /// Looks up an employee.
    fn get_employee(&self, id: EmployeeId) -> Option<Employee>;

    /// Lists every employee ordered by identifier.
    fn list_employees(&self) -> Vec<Employee>;

    /// Applies a mutation to one employee.
    fn modify_employee(&self, id: EmployeeId, f: Mutation<'_, Employee>) -> LedgerResult<Employee>;

    /// Removes an employee together with its attendance and salary records.
    ///
    /// The removal is atomic with respect to every other store operation.
    fn delete_employee(&self, id: EmployeeId) -> LedgerResult<CascadeSummary>;
}

/// Per-employee, per-day attendance.
pub trait AttendanceStore: Send + Sync {
    /// Stores a new record; fails with a conflict if one exists for the day.
    ///
    /// Fails with `EmployeeNotFound` if the employee is gone when the insert
    /// runs, so a concurrent cascade delete never leaves an orphan.
    fn insert_attendance(&self, record: AttendanceRecord) -> LedgerResult<AttendanceRecord>;

    /// Applies a mutation to one day's record.
    fn modify_attendance(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        f: Mutation<'_, AttendanceRecord>,
    ) -> LedgerResult<AttendanceRecord>;

    /// Lists an employee's records ordered by date ascending.
    fn list_attendance(&self, employee_id: EmployeeId) -> Vec<AttendanceRecord>;

    /// Lists an employee's records within one month, ordered by date ascending.
    fn list_attendance_in_month(&self, employee_id: EmployeeId, month: MonthKey)
    -> Vec<AttendanceRecord>;
}

/// Monthly salary records, unique per (employee, month).
pub trait SalaryStore: Send + Sync {
    /// Looks up a record.
    fn get_salary(&self, employee_id: EmployeeId, month: MonthKey) -> Option<SalaryRecord>;

    /// Stores the record unless one already exists for its key.
    ///
    /// Check and insert happen under one lock, so concurrent callers for the
    /// same key observe exactly one `Inserted`. Fails with `EmployeeNotFound`
    /// if the employee was deleted after the caller looked it up.
    fn insert_salary_if_absent(&self, record: SalaryRecord) -> LedgerResult<Insertion>;

    /// Applies a mutation to one record; `None` if no record exists.
    fn modify_salary(
        &self,
        employee_id: EmployeeId,
        month: MonthKey,
        f: Mutation<'_, SalaryRecord>,
    ) -> Option<LedgerResult<SalaryRecord>>;
}

/// System users.
pub trait UserStore: Send + Sync {
    /// Stores a user; fails with a conflict if the username is taken.
    fn insert_user(&self, username: &str, password_hash: String, role: &str) -> LedgerResult<User>;

    /// Looks up a user by identifier.
    fn get_user(&self, id: UserId) -> Option<User>;

    /// Looks up a user by username.
    fn find_user(&self, username: &str) -> Option<User>;

    /// Lists every user ordered by identifier.
    fn list_users(&self) -> Vec<User>;

    /// Applies a mutation to one user.
    fn modify_user(&self, id: UserId, f: Mutation<'_, User>) -> LedgerResult<User>;

    /// Removes a user after `check` approves it against the full user list.
    fn remove_user(
        &self,
        id: UserId,
        check: &mut dyn FnMut(&User, &[User]) -> LedgerResult<()>,
    ) -> LedgerResult<User>;
}

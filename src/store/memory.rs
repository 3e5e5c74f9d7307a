//! In-memory store.
//!
//! [`MemoryStore`] implements every store trait over `parking_lot` locked
//! maps. Locks are always taken in the order employees, attendance,
//! salaries, users. Attendance and salary inserts hold the employees read
//! lock, so they cannot interleave with a cascade delete.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AttendanceRecord, Employee, EmployeeId, MonthKey, SalaryRecord, User, UserId,
};

use super::{
    AttendanceStore, CascadeSummary, DirectoryStore, Insertion, Mutation, SalaryStore, UserStore,
};

type AttendanceKey = (EmployeeId, NaiveDate);
type SalaryKey = (EmployeeId, MonthKey);

/// Runs `f` against a copy of `value` and commits the copy on success.
fn apply<T: Clone>(value: &mut T, f: Mutation<'_, T>) -> LedgerResult<T> {
    let mut draft = value.clone();
    f(&mut draft)?;
    *value = draft.clone();
    Ok(draft)
}

/// Process-local store shared by all request handlers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: RwLock<BTreeMap<EmployeeId, Employee>>,
    attendance: RwLock<BTreeMap<AttendanceKey, AttendanceRecord>>,
    salaries: RwLock<HashMap<SalaryKey, SalaryRecord>>,
    users: RwLock<BTreeMap<UserId, User>>,
    last_employee_id: AtomicU64,
    last_user_id: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of salary records held for an employee.
    pub fn salary_count(&self, employee_id: EmployeeId) -> usize {
        self.salaries
            .read()
            .keys()
            .filter(|(id, _)| *id == employee_id)
            .count()
    }
}

impl DirectoryStore for MemoryStore {
    fn insert_employee(&self, mut employee: Employee) -> Employee {
        let mut employees = self.employees.write();
        employee.id = self.last_employee_id.fetch_add(1, Ordering::SeqCst) + 1;
        employees.insert(employee.id, employee.clone());
        employee
    }

    fn get_employee(&self, id: EmployeeId) -> Option<Employee> {
        self.employees.read().get(&id).cloned()
    }

    fn list_employees(&self) -> Vec<Employee> {
        self.employees.read().values().cloned().collect()
    }

    fn modify_employee(&self, id: EmployeeId, f: Mutation<'_, Employee>) -> LedgerResult<Employee> {
        let mut employees = self.employees.write();
        let employee = employees
            .get_mut(&id)
            .ok_or(LedgerError::EmployeeNotFound { employee_id: id })?;
        apply(employee, f)
    }

    fn delete_employee(&self, id: EmployeeId) -> LedgerResult<CascadeSummary> {
        let mut employees = self.employees.write();
        let mut attendance = self.attendance.write();
        let mut salaries = self.salaries.write();

        if employees.remove(&id).is_none() {
            return Err(LedgerError::EmployeeNotFound { employee_id: id });
        }

        let attendance_before = attendance.len();
        attendance.retain(|(employee_id, _), _| *employee_id != id);
        let salaries_before = salaries.len();
        salaries.retain(|(employee_id, _), _| *employee_id != id);

        Ok(CascadeSummary {
            attendance_removed: attendance_before - attendance.len(),
            salaries_removed: salaries_before - salaries.len(),
        })
    }
}

impl AttendanceStore for MemoryStore {
    fn insert_attendance(&self, record: AttendanceRecord) -> LedgerResult<AttendanceRecord> {
        let employees = self.employees.read();
        if !employees.contains_key(&record.employee_id) {
            return Err(LedgerError::EmployeeNotFound {
                employee_id: record.employee_id,
            });
        }
        let mut attendance = self.attendance.write();
        let key = (record.employee_id, record.date);
        if attendance.contains_key(&key) {
            return Err(LedgerError::conflict(format!(
                "employee {} already checked in on {}",
                record.employee_id, record.date
            )));
        }
        attendance.insert(key, record.clone());
        Ok(record)
    }

    fn modify_attendance(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        f: Mutation<'_, AttendanceRecord>,
    ) -> LedgerResult<AttendanceRecord> {
        let mut attendance = self.attendance.write();
        let record = attendance
            .get_mut(&(employee_id, date))
            .ok_or(LedgerError::AttendanceNotFound { employee_id, date })?;
        apply(record, f)
    }

    fn list_attendance(&self, employee_id: EmployeeId) -> Vec<AttendanceRecord> {
        self.attendance
            .read()
            .range((employee_id, NaiveDate::MIN)..=(employee_id, NaiveDate::MAX))
            .map(|(_, r)| r.clone())
            .collect()
    }

    fn list_attendance_in_month(
        &self,
        employee_id: EmployeeId,
        month: MonthKey,
    ) -> Vec<AttendanceRecord> {
        self.attendance
            .read()
            .range((employee_id, month.first_day())..=(employee_id, month.last_day()))
            .map(|(_, r)| r.clone())
            .collect()
    }
}

impl SalaryStore for MemoryStore {
    fn get_salary(&self, employee_id: EmployeeId, month: MonthKey) -> Option<SalaryRecord> {
        self.salaries.read().get(&(employee_id, month)).cloned()
    }

    fn insert_salary_if_absent(&self, record: SalaryRecord) -> LedgerResult<Insertion> {
        let employees = self.employees.read();
        if !employees.contains_key(&record.employee_id) {
            return Err(LedgerError::EmployeeNotFound {
                employee_id: record.employee_id,
            });
        }
        let mut salaries = self.salaries.write();
        Ok(match salaries.entry((record.employee_id, record.month)) {
            Entry::Occupied(existing) => Insertion::Existing(existing.get().clone()),
            Entry::Vacant(slot) => Insertion::Inserted(slot.insert(record).clone()),
        })
    }

    fn modify_salary(
        &self,
        employee_id: EmployeeId,
        month: MonthKey,
        f: Mutation<'_, SalaryRecord>,
    ) -> Option<LedgerResult<SalaryRecord>> {
        let mut salaries = self.salaries.write();
        salaries
            .get_mut(&(employee_id, month))
            .map(|record| apply(record, f))
    }
}

impl UserStore for MemoryStore {
    fn insert_user(&self, username: &str, password_hash: String, role: &str) -> LedgerResult<User> {
        let mut users = self.users.write();
        if users.values().any(|u| u.username == username) {
            return Err(LedgerError::conflict(format!(
                "username '{username}' already exists"
            )));
        }
        let user = User {
            id: self.last_user_id.fetch_add(1, Ordering::SeqCst) + 1,
            username: username.to_string(),
            password_hash,
            role: role.to_string(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    fn get_user(&self, id: UserId) -> Option<User> {
        self.users.read().get(&id).cloned()
    }

    fn find_user(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    fn list_users(&self) -> Vec<User> {
        self.users.read().values().cloned().collect()
    }

    fn modify_user(&self, id: UserId, f: Mutation<'_, User>) -> LedgerResult<User> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&id)
            .ok_or(LedgerError::UserNotFound { user_id: id })?;
        apply(user, f)
    }

    fn remove_user(
        &self,
        id: UserId,
        check: &mut dyn FnMut(&User, &[User]) -> LedgerResult<()>,
    ) -> LedgerResult<User> {
        let mut users = self.users.write();
        let target = users
            .get(&id)
            .cloned()
            .ok_or(LedgerError::UserNotFound { user_id: id })?;
        let all: Vec<User> = users.values().cloned().collect();
        check(&target, &all)?;
        users.remove(&id);
        Ok(target)
    }
}

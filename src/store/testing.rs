//! Store doubles for service tests.

use std::sync::Arc;

use crate::error::LedgerResult;
use crate::models::{Employee, EmployeeId};

use super::{CascadeSummary, DirectoryStore, MemoryStore, Mutation};

/// Directory that deletes the employee right after returning it, so the
/// caller always acts on a record that is already gone.
pub(crate) struct VanishingDirectory {
    pub(crate) inner: Arc<MemoryStore>,
}

impl DirectoryStore for VanishingDirectory {
    fn insert_employee(&self, employee: Employee) -> Employee {
        self.inner.insert_employee(employee)
    }

    fn get_employee(&self, id: EmployeeId) -> Option<Employee> {
        let employee = self.inner.get_employee(id)?;
        self.inner.delete_employee(id).ok()?;
        Some(employee)
    }

    fn list_employees(&self) -> Vec<Employee> {
        self.inner.list_employees()
    }

    fn modify_employee(&self, id: EmployeeId, f: Mutation<'_, Employee>) -> LedgerResult<Employee> {
        self.inner.modify_employee(id, f)
    }

    fn delete_employee(&self, id: EmployeeId) -> LedgerResult<CascadeSummary> {
        self.inner.delete_employee(id)
    }
}

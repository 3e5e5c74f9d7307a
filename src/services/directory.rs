//! Employee directory service.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::MONEY_SCALE;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Employee, EmployeeId, EmployeeStatus, NewEmployee};
use crate::store::{CascadeSummary, DirectoryStore};

fn validate_salary(amount: Decimal) -> LedgerResult<Decimal> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::validation(
            "monthly_salary",
            "must not be negative",
        ));
    }
    Ok(amount.round_dp(MONEY_SCALE))
}

/// Creates, updates and removes employees.
#[derive(Clone)]
pub struct Directory {
    store: Arc<dyn DirectoryStore>,
}

impl Directory {
    /// Creates a directory over the given store.
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Adds an active employee.
    ///
    /// Name and monthly salary are required; the salary must not be negative.
    pub fn add_employee(&self, new: NewEmployee) -> LedgerResult<Employee> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(LedgerError::validation("name", "name is required"));
        }
        let monthly_salary = new
            .monthly_salary
            .ok_or_else(|| LedgerError::validation("monthly_salary", "monthly salary is required"))
            .and_then(validate_salary)?;

        let employee = self.store.insert_employee(Employee {
            id: 0,
            name: name.to_string(),
            role: new.role.trim().to_string(),
            phone: new.phone,
            address: new.address,
            monthly_salary,
            status: EmployeeStatus::Active,
        });
        info!(employee_id = employee.id, role = %employee.role, "Employee added");
        Ok(employee)
    }

    /// Looks up an employee regardless of status.
    pub fn get(&self, id: EmployeeId) -> LedgerResult<Employee> {
        self.store
            .get_employee(id)
            .ok_or(LedgerError::EmployeeNotFound { employee_id: id })
    }

    /// Lists active employees ordered by identifier.
    pub fn list_active(&self) -> Vec<Employee> {
        self.store
            .list_employees()
            .into_iter()
            .filter(Employee::is_active)
            .collect()
    }

    /// Changes an employee's monthly base salary.
    ///
    /// Existing salary records keep the amounts they were generated with.
    pub fn update_monthly_salary(&self, id: EmployeeId, amount: Decimal) -> LedgerResult<Employee> {
        let amount = validate_salary(amount)?;
        let employee = self.store.modify_employee(id, &mut |e| {
            e.monthly_salary = amount;
            Ok(())
        })?;
        info!(employee_id = id, monthly_salary = %amount, "Monthly salary updated");
        Ok(employee)
    }

    /// Soft-deactivates an employee.
    pub fn deactivate(&self, id: EmployeeId) -> LedgerResult<Employee> {
        self.set_status(id, EmployeeStatus::Inactive)
    }

    /// Returns an employee to the active roster.
    pub fn activate(&self, id: EmployeeId) -> LedgerResult<Employee> {
        self.set_status(id, EmployeeStatus::Active)
    }

    fn set_status(&self, id: EmployeeId, status: EmployeeStatus) -> LedgerResult<Employee> {
        let employee = self.store.modify_employee(id, &mut |e| {
            e.status = status;
            Ok(())
        })?;
        info!(employee_id = id, status = ?status, "Employee status changed");
        Ok(employee)
    }

    /// Permanently removes an employee with its attendance and salary records.
    pub fn delete(&self, id: EmployeeId) -> LedgerResult<CascadeSummary> {
        let summary = self.store.delete_employee(id)?;
        info!(
            employee_id = id,
            attendance_removed = summary.attendance_removed,
            salaries_removed = summary.salaries_removed,
            "Employee deleted"
        );
        Ok(summary)
    }
}

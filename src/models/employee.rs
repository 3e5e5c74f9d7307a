//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeStatus enum
//! for representing workers in the directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned to an employee by the directory.
pub type EmployeeId = u64;

/// Whether an employee is currently on the active roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Listed on the roster and able to check in.
    #[default]
    Active,
    /// Soft-deactivated; records are kept.
    Inactive,
}

/// Represents an employee in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// The employee's display name.
    pub name: String,
    /// Free-form job role (e.g., "staff", "admin", "head").
    #[serde(default)]
    pub role: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Monthly base salary.
    pub monthly_salary: Decimal,
    /// Roster status.
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns true if the employee is on the active roster.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_ledger::models::{Employee, EmployeeStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     name: "Asha".to_string(),
    ///     role: "staff".to_string(),
    ///     phone: String::new(),
    ///     address: String::new(),
    ///     monthly_salary: Decimal::new(24000, 0),
    ///     status: EmployeeStatus::Active,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Fields supplied when adding an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// The employee's display name.
    pub name: String,
    /// Free-form job role.
    #[serde(default)]
    pub role: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Monthly base salary.
    pub monthly_salary: Option<Decimal>,
}

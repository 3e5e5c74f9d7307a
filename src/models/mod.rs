//! Core data models for the Salary Ledger.
//!
//! This module contains all the domain models used throughout the ledger.

mod attendance;
mod employee;
mod month;
mod salary;
mod user;

pub use attendance::AttendanceRecord;
pub use employee::{Employee, EmployeeId, EmployeeStatus, NewEmployee};
pub use month::MonthKey;
pub use salary::{GenerateStatus, Generated, SalaryRecord, SalaryUpdate};
pub use user::{Session, User, UserId};

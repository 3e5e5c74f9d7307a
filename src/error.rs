//! Error types for the Salary Ledger.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing employees,
//! attendance, salary records and system users.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{EmployeeId, MonthKey, UserId};

/// The main error type for the Salary Ledger.
///
/// Every error is scoped to a single request; none of them is fatal to the
/// process. The HTTP layer maps each variant onto a status code.
///
/// # Example
///
/// ```
/// use salary_ledger::error::LedgerError;
///
/// let error = LedgerError::EmployeeNotFound { employee_id: 7 };
/// assert_eq!(error.to_string(), "Employee not found: 7");
/// ```
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A month key was not in `YYYY-MM` form.
    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        value: String,
    },

    /// A request field failed validation.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The referenced employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The missing employee identifier.
        employee_id: EmployeeId,
    },

    /// No salary record has been generated for the employee and month.
    #[error("Salary record not found for employee {employee_id} in {month}")]
    SalaryNotFound {
        /// The employee identifier.
        employee_id: EmployeeId,
        /// The payroll month.
        month: MonthKey,
    },

    /// No attendance record exists for the employee on the given date.
    #[error("No check-in found for employee {employee_id} on {date}")]
    AttendanceNotFound {
        /// The employee identifier.
        employee_id: EmployeeId,
        /// The attendance date.
        date: NaiveDate,
    },

    /// The referenced system user does not exist.
    #[error("User not found: {user_id}")]
    UserNotFound {
        /// The missing user identifier.
        user_id: UserId,
    },

    /// The request conflicts with existing state.
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflict.
        message: String,
    },

    /// The requesting role lacks the capability for this action.
    #[error("Role '{role}' is not authorized: {message}")]
    Unauthorized {
        /// The role that made the request.
        role: String,
        /// A description of the refused action.
        message: String,
    },

    /// Username or password did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The request carried no valid session token.
    #[error("Authentication required: {message}")]
    Unauthenticated {
        /// Why the token was refused.
        message: String,
    },

    /// An unexpected internal failure.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the failure.
        message: String,
    },
}

impl LedgerError {
    /// Creates a validation error for the named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an authorization error for the given role.
    pub fn unauthorized(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            role: role.into(),
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

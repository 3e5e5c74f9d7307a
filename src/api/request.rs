//! Request types for the Salary Ledger API.
//!
//! Bodies never carry the caller's identity. The role and user id come from
//! the verified session token, so any `role` a client sends is ignored.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::EmployeeId;
use crate::services::Punch;

/// Body of `POST /salary/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The employee to generate for.
    pub employee_id: EmployeeId,
    /// The payroll month, `YYYY-MM`.
    pub month: String,
}

/// Query of `GET /salary/view`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewQuery {
    /// The employee to look up.
    pub employee_id: EmployeeId,
    /// The payroll month, `YYYY-MM`.
    pub month: String,
}

/// Body of `POST /salary/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSalaryRequest {
    /// The employee whose record changes.
    pub employee_id: EmployeeId,
    /// The payroll month, `YYYY-MM`.
    pub month: String,
    /// The new payable amount.
    pub total_salary: Decimal,
}

/// Body of `POST /attendance/checkin` and `POST /attendance/checkout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRequest {
    /// The employee punching in or out.
    pub employee_id: EmployeeId,
    /// Manual date, privileged roles only.
    #[serde(default)]
    pub manual_date: Option<NaiveDate>,
    /// Manual time, privileged roles only.
    #[serde(default)]
    pub manual_time: Option<NaiveTime>,
}

impl PunchRequest {
    /// Builds the punch on behalf of the authenticated caller's role.
    pub fn into_punch(self, role: impl Into<String>) -> Punch {
        Punch {
            employee_id: self.employee_id,
            role: role.into(),
            date: self.manual_date,
            time: self.manual_time,
        }
    }
}

/// Body of `POST /employees/{id}/salary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseSalaryRequest {
    /// New monthly base salary.
    pub monthly_salary: Decimal,
}

/// Body of `POST /settings/hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursRequest {
    /// New standard daily working hours.
    pub hours: Decimal,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddUserRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Role of the new account.
    pub role: String,
}

/// Body of `POST /users/{id}/password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequest {
    /// New plaintext password.
    pub password: String,
}

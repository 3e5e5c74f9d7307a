//! Response types for the Salary Ledger API.
//!
//! This module defines the success bodies, the error response structure,
//! and the mapping from [`LedgerError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::models::{GenerateStatus, Generated, SalaryRecord, SalaryUpdate, Session, UserId};
use crate::services::IssuedToken;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        json_response(self.status, self.error)
    }
}

/// Builds a JSON response with an explicit content type.
pub fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

impl From<LedgerError> for ApiErrorResponse {
    fn from(error: LedgerError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            LedgerError::ConfigNotFound { path } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", path),
            ),
            LedgerError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            LedgerError::InvalidMonth { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details("INVALID_MONTH", message, "Months are written as YYYY-MM"),
            ),
            LedgerError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            LedgerError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            LedgerError::SalaryNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "SALARY_NOT_FOUND",
                    message,
                    "No salary has been generated for this month yet; nothing to update",
                ),
            ),
            LedgerError::AttendanceNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("ATTENDANCE_NOT_FOUND", message),
            ),
            LedgerError::UserNotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("USER_NOT_FOUND", message))
            }
            LedgerError::Conflict { .. } => {
                (StatusCode::CONFLICT, ApiError::new("CONFLICT", message))
            }
            LedgerError::Unauthorized { .. } => {
                (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
            }
            LedgerError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_CREDENTIALS", message),
            ),
            LedgerError::Unauthenticated { .. } => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("UNAUTHENTICATED", message),
            ),
            LedgerError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("INTERNAL_ERROR", "Internal error", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// A plain confirmation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Creates a confirmation body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `POST /salary/generate`, on success and on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// `new`, `exists` or `error`.
    pub status: GenerateStatus,
    /// Human-readable outcome.
    pub message: String,
    /// The stored record, absent on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<SalaryRecord>,
    /// Error code, present on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<Generated> for GenerateResponse {
    fn from(generated: Generated) -> Self {
        let message = match generated.status {
            GenerateStatus::New => "Salary generated",
            GenerateStatus::Exists => "Salary already generated",
            GenerateStatus::Error => "Salary generation failed",
        };
        Self {
            status: generated.status,
            message: message.to_string(),
            record: Some(generated.record),
            code: None,
        }
    }
}

impl From<ApiError> for GenerateResponse {
    fn from(error: ApiError) -> Self {
        Self {
            status: GenerateStatus::Error,
            message: error.message,
            record: None,
            code: Some(error.code),
        }
    }
}

/// Body of a successful `POST /salary/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSalaryResponse {
    /// Human-readable outcome; states when the lock was overridden.
    pub message: String,
    /// True when a locked record was edited through the override role.
    pub overridden: bool,
    /// The record after the update.
    pub record: SalaryRecord,
}

impl From<SalaryUpdate> for UpdateSalaryResponse {
    fn from(update: SalaryUpdate) -> Self {
        let message = if update.overridden {
            "Salary updated via lock override"
        } else {
            "Salary updated successfully"
        };
        Self {
            message: message.to_string(),
            overridden: update.overridden,
            record: update.record,
        }
    }
}

/// Body of a successful `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The authenticated user.
    pub user_id: UserId,
    /// The role the token carries.
    pub role: String,
    /// Signed session token for the `Authorization: Bearer` header.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

impl LoginResponse {
    /// Combines the login identity with its issued token.
    pub fn new(session: Session, issued: IssuedToken) -> Self {
        Self {
            user_id: session.user_id,
            role: session.role,
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
        }
    }
}

/// Body of `GET/POST /settings/hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursResponse {
    /// Standard daily working hours.
    pub hours: Decimal,
}

/// Body of `DELETE /employees/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEmployeeResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Attendance records removed with the employee.
    pub attendance_removed: usize,
    /// Salary records removed with the employee.
    pub salaries_removed: usize,
}

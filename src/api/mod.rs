//! HTTP API module for the Salary Ledger.
//!
//! This module exposes the ledger, attendance, directory, user and settings
//! operations as JSON endpoints.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::{AuthUser, RequirePrivileged};
pub use handlers::create_router;
pub use request::{GenerateRequest, PunchRequest, UpdateSalaryRequest, ViewQuery};
pub use response::{ApiError, GenerateResponse, LoginResponse, UpdateSalaryResponse};
pub use state::AppState;

//! HTTP request handlers for the Salary Ledger API.
//!
//! This module contains the handler functions for all API endpoints.
//! `/health` and `/login` are public. Every other route requires a bearer
//! token, and directory, user and settings changes require a privileged
//! role.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::Response,
    routing::{delete, get, post},
};
use chrono::Local;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{EmployeeId, NewEmployee, UserId};

use super::auth::{AuthUser, RequirePrivileged};
use super::request::{
    AddUserRequest, BaseSalaryRequest, GenerateRequest, HoursRequest, LoginRequest,
    PasswordRequest, PunchRequest, UpdateSalaryRequest, ViewQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, DeleteEmployeeResponse, GenerateResponse, HoursResponse,
    LoginResponse, MessageResponse, UpdateSalaryResponse, json_response,
};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/login", post(login_handler))
        .route(
            "/employees",
            get(list_employees_handler).post(add_employee_handler),
        )
        .route(
            "/employees/:id",
            get(get_employee_handler).delete(delete_employee_handler),
        )
        .route("/employees/:id/salary", post(base_salary_handler))
        .route("/employees/:id/deactivate", post(deactivate_handler))
        .route("/employees/:id/activate", post(activate_handler))
        .route("/attendance/checkin", post(check_in_handler))
        .route("/attendance/checkout", post(check_out_handler))
        .route("/attendance/:employee_id", get(attendance_history_handler))
        .route("/salary/generate", post(generate_handler))
        .route("/salary/view", get(view_handler))
        .route("/salary/update", post(update_salary_handler))
        .route(
            "/settings/hours",
            get(get_hours_handler).post(set_hours_handler),
        )
        .route("/users", get(list_users_handler).post(add_user_handler))
        .route("/users/:id/password", post(password_handler))
        .route("/users/:id", delete(delete_user_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(req)) => return Ok(req),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn parse_query<T>(
    query: Result<Query<T>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    query.map(|Query(q)| q).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(correlation_id = %correlation_id, error = %body_text, "Query string error");
        ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
    })
}

/// Logs a failed operation and converts it to its HTTP form.
fn reject(correlation_id: Uuid, err: LedgerError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, json!({ "status": "ok" }))
}

async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, username = %request.username, "Processing login");

    let session = state
        .users()
        .login(&request.username, &request.password)
        .map_err(|err| reject(correlation_id, err))?;
    let issued = state
        .tokens()
        .issue(&session)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(
        StatusCode::OK,
        LoginResponse::new(session, issued),
    ))
}

async fn add_employee_handler(
    State(state): State<AppState>,
    RequirePrivileged(user): RequirePrivileged,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, user_id = user.user_id, name = %request.name, "Adding employee");

    let employee = state
        .directory()
        .add_employee(request)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::CREATED, employee))
}

async fn list_employees_handler(State(state): State<AppState>, _user: AuthUser) -> Response {
    json_response(StatusCode::OK, state.directory().list_active())
}

async fn get_employee_handler(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<EmployeeId>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let employee = state
        .directory()
        .get(id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, employee))
}

async fn base_salary_handler(
    State(state): State<AppState>,
    RequirePrivileged(user): RequirePrivileged,
    Path(id): Path<EmployeeId>,
    payload: Result<Json<BaseSalaryRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, user_id = user.user_id, employee_id = id, "Updating base salary");

    let employee = state
        .directory()
        .update_monthly_salary(id, request.monthly_salary)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, employee))
}

async fn deactivate_handler(
    State(state): State<AppState>,
    RequirePrivileged(user): RequirePrivileged,
    Path(id): Path<EmployeeId>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = user.user_id, employee_id = id, "Deactivating employee");
    let employee = state
        .directory()
        .deactivate(id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, employee))
}

async fn activate_handler(
    State(state): State<AppState>,
    RequirePrivileged(user): RequirePrivileged,
    Path(id): Path<EmployeeId>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = user.user_id, employee_id = id, "Activating employee");
    let employee = state
        .directory()
        .activate(id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, employee))
}

async fn delete_employee_handler(
    State(state): State<AppState>,
    RequirePrivileged(user): RequirePrivileged,
    Path(id): Path<EmployeeId>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = user.user_id, employee_id = id, "Deleting employee");
    let summary = state
        .directory()
        .delete(id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(
        StatusCode::OK,
        DeleteEmployeeResponse {
            message: format!("Employee {id} deleted"),
            attendance_removed: summary.attendance_removed,
            salaries_removed: summary.salaries_removed,
        },
    ))
}

async fn check_in_handler(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<PunchRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let punch = parse_json(payload, correlation_id)?.into_punch(user.role);
    info!(
        correlation_id = %correlation_id,
        employee_id = punch.employee_id,
        role = %punch.role,
        "Processing check-in"
    );

    let record = state
        .attendance()
        .check_in(&punch, Local::now().naive_local())
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::CREATED, record))
}

async fn check_out_handler(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<PunchRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let punch = parse_json(payload, correlation_id)?.into_punch(user.role);
    info!(
        correlation_id = %correlation_id,
        employee_id = punch.employee_id,
        role = %punch.role,
        "Processing check-out"
    );

    let record = state
        .attendance()
        .check_out(&punch, Local::now().naive_local())
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, record))
}

async fn attendance_history_handler(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(employee_id): Path<EmployeeId>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let records = state
        .attendance()
        .history(employee_id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, records))
}

/// Handler for POST /salary/generate.
///
/// Every body, including failures, carries a `status` of `new`, `exists`
/// or `error`. Authentication failures are reported the same way.
async fn generate_handler(
    State(state): State<AppState>,
    user: Result<AuthUser, ApiErrorResponse>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let parsed = user.and_then(|user| Ok((user, parse_json(payload, correlation_id)?)));
    let (user, request) = match parsed {
        Ok(parsed) => parsed,
        Err(rejected) => {
            return json_response(rejected.status, GenerateResponse::from(rejected.error));
        }
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        month = %request.month,
        role = %user.role,
        "Processing salary generation"
    );

    let start_time = Instant::now();
    match state
        .ledger()
        .generate(request.employee_id, &request.month, &user.role)
    {
        Ok(generated) => {
            info!(
                correlation_id = %correlation_id,
                status = ?generated.status,
                total_salary = %generated.record.total_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Salary generation completed"
            );
            json_response(StatusCode::OK, GenerateResponse::from(generated))
        }
        Err(err) => {
            let rejected = reject(correlation_id, err);
            json_response(rejected.status, GenerateResponse::from(rejected.error))
        }
    }
}

async fn view_handler(
    State(state): State<AppState>,
    _user: AuthUser,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let query = parse_query(query, correlation_id)?;
    let record = state
        .ledger()
        .view(query.employee_id, &query.month)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, record))
}

async fn update_salary_handler(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<UpdateSalaryRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        user_id = user.user_id,
        employee_id = request.employee_id,
        month = %request.month,
        role = %user.role,
        "Processing salary update"
    );

    let update = state
        .ledger()
        .update(
            request.employee_id,
            &request.month,
            request.total_salary,
            &user.role,
        )
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(
        StatusCode::OK,
        UpdateSalaryResponse::from(update),
    ))
}

async fn get_hours_handler(State(state): State<AppState>, _user: AuthUser) -> Response {
    json_response(
        StatusCode::OK,
        HoursResponse {
            hours: state.settings().daily_hours(),
        },
    )
}

async fn set_hours_handler(
    State(state): State<AppState>,
    RequirePrivileged(user): RequirePrivileged,
    payload: Result<Json<HoursRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, user_id = user.user_id, hours = %request.hours, "Updating standard daily hours");
    let hours = state
        .settings()
        .set_daily_hours(request.hours)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::OK, HoursResponse { hours }))
}

async fn list_users_handler(State(state): State<AppState>, _admin: RequirePrivileged) -> Response {
    json_response(StatusCode::OK, state.users().list())
}

async fn add_user_handler(
    State(state): State<AppState>,
    RequirePrivileged(user): RequirePrivileged,
    payload: Result<Json<AddUserRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, user_id = user.user_id, username = %request.username, "Adding user");

    let user = state
        .users()
        .add_user(&request.username, &request.password, &request.role)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(StatusCode::CREATED, user))
}

async fn password_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<UserId>,
    payload: Result<Json<PasswordRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, user_id = id, requester_id = user.user_id, "Updating password");
    state
        .users()
        .update_password(&user.session(), id, &request.password)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(
        StatusCode::OK,
        MessageResponse::new("Password updated"),
    ))
}

async fn delete_user_handler(
    State(state): State<AppState>,
    RequirePrivileged(requester): RequirePrivileged,
    Path(id): Path<UserId>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = id, requester_id = requester.user_id, "Deleting user");

    let removed = state
        .users()
        .delete_user(id, requester.user_id)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(json_response(
        StatusCode::OK,
        MessageResponse::new(format!("User '{}' deleted", removed.username)),
    ))
}

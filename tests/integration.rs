//! End-to-end tests for the Salary Ledger HTTP API.
//!
//! This test suite drives the router the way a client would:
//! - Salary generation, idempotence and concurrency
//! - Lock enforcement and override disclosure
//! - Hours aggregation from attendance
//! - Cascade deletion
//! - Attendance rules
//! - User management rules
//! - Bearer token authentication
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use salary_ledger::api::{AppState, create_router};
use salary_ledger::config::ConfigLoader;
use salary_ledger::models::Session;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/ledger.yaml").expect("Failed to load config");
    AppState::new(config)
}

/// A router plus bearer tokens minted by the same state.
struct TestApi {
    router: Router,
    state: AppState,
    admin: String,
    head: String,
}

impl TestApi {
    fn new(state: AppState) -> Self {
        Self {
            router: create_router(state.clone()),
            admin: token_for(&state, 100, "admin"),
            head: token_for(&state, 101, "head"),
            state,
        }
    }

    fn token(&self, role: &str) -> String {
        token_for(&self.state, 200, role)
    }
}

fn create_api_for_test() -> TestApi {
    TestApi::new(create_test_state())
}

fn token_for(state: &AppState, user_id: u64, role: &str) -> String {
    let session = Session {
        user_id,
        role: role.to_string(),
    };
    state.tokens().issue(&session).unwrap().token
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal serialized as a JSON string.
fn decimal_field(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal is serialized as a string")).unwrap()
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Sends as the admin.
async fn admin_send(api: &TestApi, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send(&api.router, method, uri, Some(&api.admin), body).await
}

async fn add_employee(api: &TestApi, name: &str, monthly_salary: &str) -> u64 {
    let (status, body) = admin_send(
        api,
        "POST",
        "/employees",
        Some(json!({
            "name": name,
            "role": "Waiter",
            "phone": "555-0100",
            "address": "1 Main St",
            "monthly_salary": monthly_salary
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "add employee failed: {body}");
    body["id"].as_u64().unwrap()
}

async fn punch(api: &TestApi, path: &str, employee_id: u64, date: &str, time: &str) -> (StatusCode, Value) {
    admin_send(
        api,
        "POST",
        path,
        Some(json!({
            "employee_id": employee_id,
            "manual_date": date,
            "manual_time": time
        })),
    )
    .await
}

async fn work_day(api: &TestApi, employee_id: u64, date: &str, from: &str, to: &str) {
    let (status, body) = punch(api, "/attendance/checkin", employee_id, date, from).await;
    assert_eq!(status, StatusCode::CREATED, "check-in failed: {body}");
    let (status, body) = punch(api, "/attendance/checkout", employee_id, date, to).await;
    assert_eq!(status, StatusCode::OK, "check-out failed: {body}");
}

async fn generate(api: &TestApi, employee_id: u64, month: &str) -> (StatusCode, Value) {
    admin_send(
        api,
        "POST",
        "/salary/generate",
        Some(json!({ "employee_id": employee_id, "month": month })),
    )
    .await
}

async fn update(
    api: &TestApi,
    employee_id: u64,
    month: &str,
    amount: &str,
    token: &str,
) -> (StatusCode, Value) {
    send(
        &api.router,
        "POST",
        "/salary/update",
        Some(token),
        Some(json!({
            "employee_id": employee_id,
            "month": month,
            "total_salary": amount
        })),
    )
    .await
}

async fn view(api: &TestApi, employee_id: u64, month: &str) -> (StatusCode, Value) {
    admin_send(
        api,
        "GET",
        &format!("/salary/view?employee_id={employee_id}&month={month}"),
        None,
    )
    .await
}

async fn login(api: &TestApi, username: &str, password: &str) -> (StatusCode, Value) {
    send(
        &api.router,
        "POST",
        "/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn test_generate_is_idempotent() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    work_day(&api, id, "2024-06-03", "09:00:00", "17:00:00").await;

    let (status, first) = generate(&api, id, "2024-06").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "new");

    let (status, second) = generate(&api, id, "2024-06").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["status"], "exists");
    assert_eq!(
        decimal_field(&first["record"]["total_salary"]),
        decimal_field(&second["record"]["total_salary"])
    );
    assert_eq!(first["record"]["generated_at"], second["record"]["generated_at"]);
}

#[tokio::test]
async fn test_hours_aggregate_across_days() {
    let api = create_api_for_test();
    // 4800 / (30 days * 16 hours) = 10.00 per hour in June
    let id = add_employee(&api, "Ana", "4800").await;
    work_day(&api, id, "2024-06-01", "09:00:00", "17:00:00").await;
    work_day(&api, id, "2024-06-02", "09:00:00", "13:30:00").await;
    // Outside the month, must not count
    work_day(&api, id, "2024-07-01", "09:00:00", "17:00:00").await;

    let (status, body) = generate(&api, id, "2024-06").await;
    assert_eq!(status, StatusCode::OK);

    let record = &body["record"];
    assert_eq!(record["month"], "2024-06");
    assert_eq!(decimal_field(&record["total_hours"]), decimal("12.5"));
    assert_eq!(decimal_field(&record["hourly_rate"]), decimal("10"));
    assert_eq!(decimal_field(&record["total_salary"]), decimal("125"));
    assert_eq!(record["locked"], true);
}

#[tokio::test]
async fn test_month_without_attendance_generates_zero() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;

    let (status, body) = generate(&api, id, "2024-02").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "new");
    assert_eq!(decimal_field(&body["record"]["total_hours"]), Decimal::ZERO);
    assert_eq!(decimal_field(&body["record"]["total_salary"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_daily_hours_setting_changes_later_rates_only() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    work_day(&api, id, "2024-06-03", "09:00:00", "17:00:00").await;
    work_day(&api, id, "2024-07-01", "09:00:00", "17:00:00").await;

    let (_, june) = generate(&api, id, "2024-06").await;
    assert_eq!(decimal_field(&june["record"]["hourly_rate"]), decimal("10"));

    let (status, _) = admin_send(&api, "POST", "/settings/hours", Some(json!({ "hours": "8" }))).await;
    assert_eq!(status, StatusCode::OK);

    // 4800 / (31 days * 8 hours) = 19.354... per hour in July
    let (_, july) = generate(&api, id, "2024-07").await;
    assert_eq!(decimal_field(&july["record"]["hourly_rate"]), decimal("19.35"));

    let (_, june_again) = view(&api, id, "2024-06").await;
    assert_eq!(decimal_field(&june_again["hourly_rate"]), decimal("10"));
}

#[tokio::test]
async fn test_flat_policy_pays_monthly_salary() {
    let config = ConfigLoader::parse("payroll:\n  pay_policy: flat\n  standard_daily_hours: 8\n")
        .expect("Failed to parse config");
    let api = TestApi::new(AppState::new(config));
    let id = add_employee(&api, "Ana", "3100.50").await;
    work_day(&api, id, "2024-06-03", "09:00:00", "10:00:00").await;

    let (status, body) = generate(&api, id, "2024-06").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body["record"]["total_salary"]), decimal("3100.50"));
    assert_eq!(decimal_field(&body["record"]["total_hours"]), decimal("1"));
}

#[tokio::test]
async fn test_concurrent_generation_yields_one_new() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    work_day(&api, id, "2024-06-03", "09:00:00", "17:00:00").await;

    let mut handles = Vec::new();
    for _ in 0..16 {
        let router = api.router.clone();
        let token = api.admin.clone();
        handles.push(tokio::spawn(async move {
            send(
                &router,
                "POST",
                "/salary/generate",
                Some(&token),
                Some(json!({ "employee_id": id, "month": "2024-06" })),
            )
            .await
        }));
    }

    let mut statuses = Vec::new();
    let mut totals = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        statuses.push(body["status"].as_str().unwrap().to_string());
        totals.push(decimal_field(&body["record"]["total_salary"]));
    }

    assert_eq!(statuses.iter().filter(|s| *s == "new").count(), 1);
    assert_eq!(statuses.iter().filter(|s| *s == "exists").count(), 15);
    assert!(totals.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_generate_error_cases_carry_error_status() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;

    for month in ["2024-13", "2024-6", "June", "2024-06-01"] {
        let (status, body) = generate(&api, id, month).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "month {month}");
        assert_eq!(body["status"], "error");
    }

    let (status, body) = generate(&api, id + 100, "2024-06").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");

    let (status, body) = admin_send(
        &api,
        "POST",
        "/salary/generate",
        Some(json!({ "month": "2024-06" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

// =============================================================================
// Lock and Update
// =============================================================================

#[tokio::test]
async fn test_locked_record_rejects_non_override_role() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    work_day(&api, id, "2024-06-03", "09:00:00", "17:00:00").await;
    let (_, generated) = generate(&api, id, "2024-06").await;
    let original = decimal_field(&generated["record"]["total_salary"]);

    for role in ["admin", "staff", "", "Head"] {
        let (status, body) = update(&api, id, "2024-06", "9999", &api.token(role)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "role {role:?}");
        assert_eq!(body["code"], "FORBIDDEN");
    }

    let (status, record) = view(&api, id, "2024-06").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&record["total_salary"]), original);
    assert_eq!(record["locked"], true);
}

#[tokio::test]
async fn test_override_role_updates_locked_record_and_discloses_it() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    work_day(&api, id, "2024-06-03", "09:00:00", "17:00:00").await;
    let (_, generated) = generate(&api, id, "2024-06").await;

    let (status, body) = update(&api, id, "2024-06", "1500.505", &api.head).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overridden"], true);
    assert!(body["message"].as_str().unwrap().contains("override"));
    assert_eq!(body["record"]["locked"], true);

    let (_, record) = view(&api, id, "2024-06").await;
    assert_eq!(decimal_field(&record["total_salary"]), decimal("1500.50"));
    assert_eq!(record["locked"], true);
    // Hours and rate are not recomputed
    assert_eq!(record["total_hours"], generated["record"]["total_hours"]);
    assert_eq!(record["hourly_rate"], generated["record"]["hourly_rate"]);
}

#[tokio::test]
async fn test_update_validation_and_missing_record() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;

    let (status, body) = update(&api, id, "2024-06", "100", &api.head).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SALARY_NOT_FOUND");

    generate(&api, id, "2024-06").await;

    let (status, body) = update(&api, id, "2024-06", "-1", &api.head).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = update(&api, id, "06-2024", "100", &api.head).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_MONTH");
}

#[tokio::test]
async fn test_view_before_generate_is_not_found() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;

    let (status, body) = view(&api, id, "2024-06").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SALARY_NOT_FOUND");
}

// =============================================================================
// Directory
// =============================================================================

#[tokio::test]
async fn test_delete_employee_cascades() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    let other = add_employee(&api, "Ben", "4800").await;
    work_day(&api, id, "2024-06-01", "09:00:00", "17:00:00").await;
    work_day(&api, id, "2024-06-02", "09:00:00", "17:00:00").await;
    work_day(&api, other, "2024-06-01", "09:00:00", "17:00:00").await;
    generate(&api, id, "2024-06").await;
    generate(&api, other, "2024-06").await;

    let (status, body) = admin_send(&api, "DELETE", &format!("/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendance_removed"], 2);
    assert_eq!(body["salaries_removed"], 1);

    let (status, _) = view(&api, id, "2024-06").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = admin_send(&api, "GET", &format!("/attendance/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Other employees are untouched
    let (status, _) = view(&api, other, "2024-06").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_deactivated_employee_hidden_from_list_but_kept() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    add_employee(&api, "Ben", "4800").await;

    let (status, body) = admin_send(&api, "POST", &format!("/employees/{id}/deactivate"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "inactive");

    let (_, list) = admin_send(&api, "GET", "/employees", None).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ben"]);

    let (status, body) = admin_send(&api, "GET", &format!("/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ana");

    let (status, body) = admin_send(&api, "POST", &format!("/employees/{id}/activate"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn test_employee_validation() {
    let api = create_api_for_test();

    let (status, body) = admin_send(
        &api,
        "POST",
        "/employees",
        Some(json!({ "name": "  ", "monthly_salary": "100" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = admin_send(
        &api,
        "POST",
        "/employees",
        Some(json!({ "name": "Ana" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = add_employee(&api, "Ana", "100").await;
    let (status, _) = admin_send(
        &api,
        "POST",
        &format!("/employees/{id}/salary"),
        Some(json!({ "monthly_salary": "-5" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = admin_send(
        &api,
        "POST",
        &format!("/employees/{id}/salary"),
        Some(json!({ "monthly_salary": "5200" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body["monthly_salary"]), decimal("5200"));
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_double_check_in_is_conflict() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;

    let (status, _) = punch(&api, "/attendance/checkin", id, "2024-06-03", "09:00:00").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = punch(&api, "/attendance/checkin", id, "2024-06-03", "10:00:00").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_check_out_rules() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;

    // No check-in for the day
    let (status, body) = punch(&api, "/attendance/checkout", id, "2024-06-03", "17:00:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    punch(&api, "/attendance/checkin", id, "2024-06-03", "09:00:00").await;

    // Out before in
    let (status, _) = punch(&api, "/attendance/checkout", id, "2024-06-03", "08:00:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = punch(&api, "/attendance/checkout", id, "2024-06-03", "11:15:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body["worked_hours"]), decimal("2.25"));

    let (status, _) = punch(&api, "/attendance/checkout", id, "2024-06-03", "12:00:00").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_manual_time_requires_privileged_role() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    let staff = api.token("staff");

    let (status, body) = send(
        &api.router,
        "POST",
        "/attendance/checkin",
        Some(&staff),
        Some(json!({ "employee_id": id, "manual_time": "09:00:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    // The current clock needs no privilege
    let (status, _) = send(
        &api.router,
        "POST",
        "/attendance/checkin",
        Some(&staff),
        Some(json!({ "employee_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_attendance_history_most_recent_first() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    work_day(&api, id, "2024-06-01", "09:00:00", "17:00:00").await;
    work_day(&api, id, "2024-06-05", "09:00:00", "17:00:00").await;
    work_day(&api, id, "2024-06-03", "09:00:00", "17:00:00").await;

    let (status, body) = admin_send(&api, "GET", &format!("/attendance/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-06-05", "2024-06-03", "2024-06-01"]);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_user_lifecycle() {
    let api = create_api_for_test();

    let (status, head) = admin_send(
        &api,
        "POST",
        "/users",
        Some(json!({ "username": "owner", "password": "long-password", "role": "head" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(head.get("password_hash").is_none());
    let head_id = head["id"].as_u64().unwrap();

    let (status, admin) = admin_send(
        &api,
        "POST",
        "/users",
        Some(json!({ "username": "clerk", "password": "long-password", "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let admin_id = admin["id"].as_u64().unwrap();

    let (status, _) = admin_send(
        &api,
        "POST",
        "/users",
        Some(json!({ "username": "clerk", "password": "long-password", "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, session) = login(&api, "owner", "long-password").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["role"], "head");
    assert_eq!(session["user_id"], head_id);
    assert_eq!(session["token_type"], "Bearer");
    assert_eq!(session["expires_in"], 3600);
    let owner_token = session["token"].as_str().unwrap().to_string();

    let (status, body) = login(&api, "owner", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
    assert!(body.get("token").is_none());

    let (status, body) = login(&api, "nobody", "long-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");

    let (_, session) = login(&api, "clerk", "long-password").await;
    let clerk_token = session["token"].as_str().unwrap().to_string();

    // Self-deletion; the requester is whoever the token names
    let (status, _) = send(
        &api.router,
        "DELETE",
        &format!("/users/{admin_id}"),
        Some(&clerk_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Last head
    let (status, _) = send(
        &api.router,
        "DELETE",
        &format!("/users/{head_id}"),
        Some(&clerk_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &api.router,
        "DELETE",
        &format!("/users/{admin_id}"),
        Some(&owner_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, users) = send(&api.router, "GET", "/users", Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_password_change_self_or_privileged() {
    let api = create_api_for_test();
    let (_, cashier) = admin_send(
        &api,
        "POST",
        "/users",
        Some(json!({ "username": "till", "password": "long-password", "role": "cashier" })),
    )
    .await;
    let cashier_id = cashier["id"].as_u64().unwrap();
    let (_, session) = login(&api, "till", "long-password").await;
    let cashier_token = session["token"].as_str().unwrap().to_string();

    // A non-privileged user may not touch another account
    let (status, _) = send(
        &api.router,
        "POST",
        "/users/100/password",
        Some(&cashier_token),
        Some(json!({ "password": "hijacked-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &api.router,
        "POST",
        &format!("/users/{cashier_id}/password"),
        Some(&cashier_token),
        Some(json!({ "password": "fresh-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = login(&api, "till", "fresh-password").await;
    assert_eq!(status, StatusCode::OK);

    // Nor administer users
    let (status, _) = send(&api.router, "GET", "/users", Some(&cashier_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_short_password_rejected() {
    let api = create_api_for_test();
    let (status, body) = admin_send(
        &api,
        "POST",
        "/users",
        Some(json!({ "username": "owner", "password": "short", "role": "head" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_bootstrap_head_can_log_in_and_override() {
    let api = create_api_for_test();
    let bootstrap = api.state.config().config().users.bootstrap.clone().unwrap();
    api.state.users().bootstrap(&bootstrap).unwrap();

    let id = add_employee(&api, "Ana", "4800").await;
    generate(&api, id, "2024-06").await;

    let (status, session) = login(&api, &bootstrap.username, &bootstrap.password).await;
    assert_eq!(status, StatusCode::OK);
    let token = session["token"].as_str().unwrap().to_string();

    let (status, body) = update(&api, id, "2024-06", "700", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overridden"], true);
}

#[tokio::test]
async fn test_role_in_body_does_not_grant_override() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    let (_, generated) = generate(&api, id, "2024-06").await;

    let (status, body) = send(
        &api.router,
        "POST",
        "/salary/update",
        Some(&api.admin),
        Some(json!({
            "employee_id": id,
            "month": "2024-06",
            "total_salary": "9999",
            "role": "head"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (_, record) = view(&api, id, "2024-06").await;
    assert_eq!(record["total_salary"], generated["record"]["total_salary"]);
}

#[tokio::test]
async fn test_missing_or_tampered_token_is_rejected() {
    let api = create_api_for_test();
    let id = add_employee(&api, "Ana", "4800").await;
    generate(&api, id, "2024-06").await;
    let body = json!({ "employee_id": id, "month": "2024-06", "total_salary": "1" });

    let (status, response) = send(&api.router, "POST", "/salary/update", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["code"], "UNAUTHENTICATED");

    // Change the first signature character
    let signature_start = api.head.rfind('.').unwrap() + 1;
    let original = &api.head[signature_start..signature_start + 1];
    let replacement = if original == "A" { "B" } else { "A" };
    let mut tampered = api.head.clone();
    tampered.replace_range(signature_start..signature_start + 1, replacement);
    let (status, _) = update(&api, id, "2024-06", "1", &tampered).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A token signed by another process
    let foreign = token_for(&create_test_state(), 101, "head");
    let (status, _) = update(&api, id, "2024-06", "1", &foreign).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = admin_send(&api, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

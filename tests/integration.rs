//! Integration tests for the payroll engine.
//!
//! These tests load `config/payroll.yaml` and the sample CSV files under
//! `data/`, then drive the HTTP router end to end:
//! - Employee lookup
//! - Statutory deductions and withholding tax
//! - Hours worked, including flagged entries and duplicates
//! - Gross and net salary
//! - Error cases

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::config::ConfigLoader;
use payroll_engine::data::DataLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let loader = ConfigLoader::load("./config/payroll.yaml").expect("Failed to load config");
    let config = loader.config();
    let (data, _report) = DataLoader::from_config(config)
        .load(&config.data)
        .expect("Failed to load sample data");
    AppState::new(data)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected a decimal string, got {}", value));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

async fn read_response(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    read_response(create_router_for_test(), request).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    read_response(create_router_for_test(), request).await
}

fn range_request(employee_id: &str, start: &str, end: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "start_date": start,
        "end_date": end
    })
}

// =============================================================================
// Employee lookup
// =============================================================================

#[tokio::test]
async fn test_employee_lookup_from_csv() {
    let (status, body) = get("/employees/10001").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "10001");
    assert_eq!(body["full_name"], "Andrea Dela Cruz");
    assert_eq!(body["birthday"], "10/11/1983");
    assert_decimal(&body["basic_salary"], "90000");
    assert_decimal(&body["hourly_rate"], "535.71");
}

#[tokio::test]
async fn test_rejected_employee_row_is_not_loaded() {
    let (status, body) = get("/employees/10005").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

// =============================================================================
// Deductions and withholding tax
// =============================================================================

#[tokio::test]
async fn test_deductions_at_20000() {
    let (status, body) = post("/payroll/deductions", json!({"basic_salary": "20000"})).await;

    assert_eq!(status, StatusCode::OK);
    let deductions = body["deductions"].as_array().unwrap();
    let names: Vec<&str> = deductions.iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["SSS", "PhilHealth", "Pag-IBIG"]);
    assert_decimal(&deductions[0]["amount"], "900");
    assert_decimal(&deductions[1]["amount"], "300");
    assert_decimal(&deductions[2]["amount"], "400");
    assert_decimal(&body["total_deductions"], "1600");
}

#[tokio::test]
async fn test_deductions_at_ceilings() {
    let (status, body) = post("/payroll/deductions", json!({"basic_salary": "60000"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["deductions"][0]["amount"], "1125");
    assert_decimal(&body["deductions"][1]["amount"], "900");
    assert_decimal(&body["deductions"][2]["amount"], "1200");
}

#[tokio::test]
async fn test_withholding_tax_boundaries() {
    let cases = [
        ("20832", "0"),
        ("33333", "2500"),
        ("56775", "8360.5"),
        ("666667", "200833.33"),
    ];

    for (income, expected) in cases {
        let (status, body) =
            post("/payroll/withholding-tax", json!({"taxable_income": income})).await;
        assert_eq!(status, StatusCode::OK);
        assert_decimal(&body["withholding_tax"], expected);
    }
}

#[tokio::test]
async fn test_withholding_tax_negative_income_is_zero() {
    let (status, body) = post("/payroll/withholding-tax", json!({"taxable_income": "-250"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["withholding_tax"], "0");
}

// =============================================================================
// Hours worked
// =============================================================================

#[tokio::test]
async fn test_hours_worked_excludes_flagged_entry() {
    let (status, body) = post(
        "/payroll/hours",
        range_request("10003", "2024-06-03", "2024-06-07"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_minutes"], 1590);

    let days = body["days"].as_array().unwrap();
    let dates: Vec<&str> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2024-06-03", "2024-06-04", "2024-06-05", "2024-06-06"]);

    assert_eq!(days[0]["worked"], json!({"status": "valid", "minutes": 540}));
    assert_eq!(days[2]["worked"], json!({"status": "invalid", "minutes": -540}));

    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "INVALID_TIME_ENTRY");
    assert_eq!(warnings[0]["date"], "2024-06-05");
}

#[tokio::test]
async fn test_hours_worked_duplicate_date_uses_last_row() {
    let (status, body) = post(
        "/payroll/hours",
        range_request("10003", "2024-06-04", "2024-06-04"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"][0]["login"], "08:30:00");
    assert_eq!(body["days"][0]["logout"], "17:30:00");
    assert_eq!(body["total_minutes"], 540);
}

#[tokio::test]
async fn test_hours_worked_unknown_employee_is_empty() {
    let (status, body) = post(
        "/payroll/hours",
        range_request("10099", "2024-06-01", "2024-06-30"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_minutes"], 0);
    assert!(body["days"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_hours_worked_inverted_range_returns_400() {
    let (status, body) = post(
        "/payroll/hours",
        range_request("10003", "2024-06-07", "2024-06-03"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DATE_RANGE");
}

// =============================================================================
// Gross salary
// =============================================================================

#[tokio::test]
async fn test_gross_salary_from_sample_attendance() {
    let (status, body) = post(
        "/payroll/gross",
        range_request("10003", "2024-06-03", "2024-06-07"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["total_hours"], "26.5");
    assert_decimal(&body["hourly_rate"], "119.05");
    assert_decimal(&body["gross_salary"], "3154.825");
    assert_eq!(body["date_range"]["start"], "2024-06-03");
    assert_eq!(body["date_range"]["end"], "2024-06-07");
}

#[tokio::test]
async fn test_gross_salary_second_employee() {
    let (status, body) = post(
        "/payroll/gross",
        range_request("10001", "2024-06-03", "2024-06-07"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["total_hours"], "18");
    assert_decimal(&body["gross_salary"], "9642.78");
}

#[tokio::test]
async fn test_gross_salary_unknown_employee_returns_404() {
    let (status, body) = post(
        "/payroll/gross",
        range_request("10099", "2024-06-03", "2024-06-07"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

// =============================================================================
// Net salary
// =============================================================================

#[tokio::test]
async fn test_net_salary_for_each_sample_employee() {
    let cases = [
        ("10001", "3825", "86175", "16685.4", "69489.6"),
        ("10002", "3225", "56775", "8360.5", "48414.5"),
        ("10003", "1600", "18400", "0", "18400"),
        ("10004", "1991.25", "22758.75", "385.15", "22373.6"),
    ];

    for (id, deductions, taxable, tax, net) in cases {
        let (status, body) = post("/payroll/net", json!({"employee_id": id})).await;

        assert_eq!(status, StatusCode::OK, "status for {}", id);
        assert_eq!(body["employee_id"], id);
        assert_decimal(&body["total_deductions"], deductions);
        assert_decimal(&body["taxable_income"], taxable);
        assert_decimal(&body["withholding_tax"], tax);
        assert_decimal(&body["net_salary"], net);
    }
}

#[tokio::test]
async fn test_net_salary_unknown_employee_returns_404() {
    let (status, body) = post("/payroll/net", json!({"employee_id": "10099"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/payroll/gross")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"employee_id\": "))
        .unwrap();
    let (status, body) = read_response(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_invalid_date_value_returns_400() {
    let (status, body) = post(
        "/payroll/gross",
        range_request("10003", "06/03/2024", "2024-06-07"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/payroll/net")
        .body(Body::from(json!({"employee_id": "10003"}).to_string()))
        .unwrap();
    let (status, body) = read_response(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_CONTENT_TYPE");
}

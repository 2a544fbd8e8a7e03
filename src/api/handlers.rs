//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_withholding_tax;
use crate::error::EngineError;
use crate::store::EmployeeLookup;

use super::request::{
    AttendanceRangeRequest, DeductionsRequest, NetSalaryRequest, WithholdingTaxRequest,
};
use super::response::{ApiError, ApiErrorResponse, DeductionsResponse, WithholdingTaxResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees/:id", get(employee_handler))
        .route("/payroll/deductions", post(deductions_handler))
        .route("/payroll/withholding-tax", post(withholding_tax_handler))
        .route("/payroll/hours", post(hours_handler))
        .route("/payroll/gross", post(gross_handler))
        .route("/payroll/net", post(net_handler))
        .with_state(state)
}

/// Handler for GET /employees/:id.
async fn employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Looking up employee");

    match state.data().employees.get(&employee_id) {
        Some(employee) => json_response(StatusCode::OK, employee),
        None => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                "Employee not found"
            );
            error_response(EngineError::EmployeeNotFound { employee_id }.into())
        }
    }
}

/// Handler for POST /payroll/deductions.
///
/// Returns each statutory contribution and their total.
async fn deductions_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeductionsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing deductions request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if request.basic_salary < Decimal::ZERO {
        warn!(
            correlation_id = %correlation_id,
            basic_salary = %request.basic_salary,
            "Negative basic salary"
        );
        return error_response(ApiErrorResponse::bad_request(ApiError::new(
            "VALIDATION_ERROR",
            format!("basic_salary must not be negative, got {}", request.basic_salary),
        )));
    }

    let engine = state.engine();
    let deductions = engine.deductions().calculate(request.basic_salary);
    let total_deductions: Decimal = deductions.iter().map(|d| d.amount).sum();

    info!(
        correlation_id = %correlation_id,
        basic_salary = %request.basic_salary,
        total_deductions = %total_deductions,
        "Deductions computed"
    );

    json_response(
        StatusCode::OK,
        &DeductionsResponse {
            basic_salary: request.basic_salary,
            deductions,
            total_deductions,
        },
    )
}

/// Handler for POST /payroll/withholding-tax.
async fn withholding_tax_handler(
    payload: Result<Json<WithholdingTaxRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing withholding tax request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let withholding_tax = calculate_withholding_tax(request.taxable_income);

    info!(
        correlation_id = %correlation_id,
        taxable_income = %request.taxable_income,
        withholding_tax = %withholding_tax,
        "Withholding tax computed"
    );

    json_response(
        StatusCode::OK,
        &WithholdingTaxResponse {
            taxable_income: request.taxable_income,
            withholding_tax,
        },
    )
}

/// Handler for POST /payroll/hours.
///
/// Returns the per-date breakdown and total; flagged entries are listed as
/// warnings rather than failing the request.
async fn hours_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRangeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing hours worked request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = state
        .engine()
        .compute_hours_worked(&request.employee_id, request.start_date, request.end_date);

    match result {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                days = summary.days.len(),
                total = %summary.formatted_total(),
                warnings = summary.warnings.len(),
                "Hours worked computed"
            );
            json_response(StatusCode::OK, &summary)
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for POST /payroll/gross.
async fn gross_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRangeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing gross salary request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let result = state
        .engine()
        .compute_gross_salary(&request.employee_id, request.start_date, request.end_date);

    match result {
        Ok(gross) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %gross.employee_id,
                total_hours = %gross.total_hours,
                gross_salary = %gross.gross_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Gross salary computed"
            );
            json_response(StatusCode::OK, &gross)
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for POST /payroll/net.
async fn net_handler(
    State(state): State<AppState>,
    payload: Result<Json<NetSalaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing net salary request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    match state.engine().compute_net_salary(&request.employee_id) {
        Ok(net) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                net_salary = %net.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Net salary computed"
            );
            json_response(StatusCode::OK, &net)
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(error_response(ApiErrorResponse::bad_request(error)))
}

fn engine_failure(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Payroll computation failed");
    error_response(err.into())
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, &api_error.error)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

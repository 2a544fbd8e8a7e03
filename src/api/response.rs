//! Response types for the payroll engine API.
//!
//! This module defines the response bodies and the mapping from
//! [`EngineError`] to HTTP errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DeductionResult;
use crate::error::EngineError;

/// Response body for `POST /payroll/deductions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionsResponse {
    /// The basic salary the deductions were computed for.
    pub basic_salary: Decimal,
    /// Each contribution, in schedule order.
    pub deductions: Vec<DeductionResult>,
    /// Sum of all contributions.
    pub total_deductions: Decimal,
}

/// Response body for `POST /payroll/withholding-tax`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithholdingTaxResponse {
    /// The taxable income the tax was computed for.
    pub taxable_income: Decimal,
    /// The withholding tax.
    pub withholding_tax: Decimal,
}

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

    /// Creates an employee not found error response.
    pub fn employee_not_found(employee_id: &str) -> Self {
        Self::with_details(
            "EMPLOYEE_NOT_FOUND",
            format!("Employee not found: {}", employee_id),
            format!("No employee with number '{}' is loaded", employee_id),
        )
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
    /// Creates a 400 response carrying the given error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::EmployeeNotFound { employee_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::employee_not_found(&employee_id),
            },
            EngineError::InvalidDateRange { start, end } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_DATE_RANGE",
                    format!("Invalid date range: start {} is after end {}", start, end),
                    "start_date must not be after end_date",
                ),
            ),
            EngineError::InvalidTimeEntry {
                employee_id,
                date,
                message,
            } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INVALID_TIME_ENTRY",
                    format!("Invalid time entry for employee '{}' on {}", employee_id, date),
                    message,
                ),
            },
            EngineError::InvalidEmployee { field, message } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    format!("Invalid employee field '{}': {}", field, message),
                    "The employee data contains invalid information",
                ),
            ),
            EngineError::InvalidDate { value, format } => ApiErrorResponse::bad_request(
                ApiError::new(
                    "INVALID_DATE",
                    format!("Invalid date '{}': expected format {}", value, format),
                ),
            ),
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::DataFileNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DATA_ERROR",
                    "Data file error",
                    format!("Data file not found: {}", path),
                ),
            },
            EngineError::DataParseError {
                path,
                line,
                message,
            } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DATA_ERROR",
                    "Data file error",
                    format!("Failed to read {} at line {}: {}", path, line, message),
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

//! Request types for the payroll engine API.
//!
//! This module defines the JSON request bodies for the `/payroll/*`
//! endpoints. Dates are ISO-8601; amounts may be JSON strings or numbers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for `POST /payroll/deductions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionsRequest {
    /// Monthly basic salary to compute contributions for.
    pub basic_salary: Decimal,
}

/// Request body for `POST /payroll/withholding-tax`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithholdingTaxRequest {
    /// Basic salary less statutory deductions.
    pub taxable_income: Decimal,
}

/// Request body for `POST /payroll/hours` and `POST /payroll/gross`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRangeRequest {
    /// The employee to compute for.
    pub employee_id: String,
    /// First date of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last date of the range (inclusive).
    pub end_date: NaiveDate,
}

/// Request body for `POST /payroll/net`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetSalaryRequest {
    /// The employee to compute for.
    pub employee_id: String,
}

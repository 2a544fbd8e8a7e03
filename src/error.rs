//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading payroll data and
//! computing salaries.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Every fallible operation in the crate returns this error type. All
/// variants are recoverable at the caller boundary.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "10099".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: 10099");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The referenced employee identifier is absent from the lookup.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was not found.
        employee_id: String,
    },

    /// A date range whose start falls after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// An attendance entry whose logout precedes its login.
    #[error("Invalid time entry for employee '{employee_id}' on {date}: {message}")]
    InvalidTimeEntry {
        /// The employee the entry belongs to.
        employee_id: String,
        /// The date of the entry.
        date: NaiveDate,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

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

    /// A data file was not found at the specified path.
    #[error("Data file not found: {path}")]
    DataFileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A data file could not be read as CSV.
    #[error("Failed to read data file '{path}' at line {line}: {message}")]
    DataParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// The line number of the failure (1-based, 0 if unknown).
        line: u64,
        /// A description of the parse error.
        message: String,
    },

    /// Date text that does not match the configured format.
    #[error("Invalid date '{value}': expected format {format}")]
    InvalidDate {
        /// The text that failed to parse.
        value: String,
        /// The expected `chrono` format string.
        format: String,
    },

    /// An arithmetic result that does not fit in a `Decimal`.
    #[error("Calculation failed: {message}")]
    CalculationError {
        /// A description of the failed calculation.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            employee_id: "10099".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: 10099");
    }

    #[test]
    fn test_invalid_date_range_displays_both_dates() {
        let error = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: start 2024-06-10 is after end 2024-06-03"
        );
    }

    #[test]
    fn test_invalid_time_entry_displays_employee_and_date() {
        let error = EngineError::InvalidTimeEntry {
            employee_id: "10003".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            message: "logout 09:00 precedes login 18:00".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid time entry for employee '10003' on 2024-06-05: logout 09:00 precedes login 18:00"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "basic_salary".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'basic_salary': must not be negative"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file 'config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_data_parse_error_displays_line() {
        let error = EngineError::DataParseError {
            path: "data/attendance.csv".to_string(),
            line: 12,
            message: "unequal lengths".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read data file 'data/attendance.csv' at line 12: unequal lengths"
        );
    }

    #[test]
    fn test_invalid_date_displays_expected_format() {
        let error = EngineError::InvalidDate {
            value: "2024-13-01".to_string(),
            format: "%m/%d/%Y".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date '2024-13-01': expected format %m/%d/%Y"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "gross salary overflows".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation failed: gross salary overflows");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                employee_id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

//! Employee model.
//!
//! This module defines the [`Employee`] master record that the payroll
//! engine reads basic salary and hourly rate from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents an employee's master data.
///
/// Employees are immutable once loaded and are owned by a read-only
/// lookup keyed by [`Employee::id`]. Deserialization runs the same checks as
/// [`Employee::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEmployee")]
pub struct Employee {
    /// Unique identifier for the employee (the employee number).
    pub id: String,
    /// The employee's full name, first name first.
    pub full_name: String,
    /// The employee's birthday as it appears in the source data.
    ///
    /// Kept as opaque text; the engine never interprets it.
    pub birthday: String,
    /// Fixed monthly base pay before deductions.
    pub basic_salary: Decimal,
    /// Hourly rate used for attendance-based gross pay.
    pub hourly_rate: Decimal,
}

impl Employee {
    /// Creates an employee, rejecting negative salary or rate values.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new(
    ///     "10003",
    ///     "Lorna Reyes",
    ///     "08/04/1990",
    ///     Decimal::new(20000, 0),
    ///     Decimal::new(11905, 2),
    /// )
    /// .unwrap();
    /// assert_eq!(employee.id, "10003");
    ///
    /// let negative = Employee::new("10004", "X", "", Decimal::new(-1, 0), Decimal::ZERO);
    /// assert!(negative.is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        birthday: impl Into<String>,
        basic_salary: Decimal,
        hourly_rate: Decimal,
    ) -> EngineResult<Self> {
        let employee = Self {
            id: id.into(),
            full_name: full_name.into(),
            birthday: birthday.into(),
            basic_salary,
            hourly_rate,
        };
        employee.validate()?;
        Ok(employee)
    }

    /// Checks the non-negativity invariants on salary and rate.
    pub fn validate(&self) -> EngineResult<()> {
        if self.basic_salary < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "basic_salary".to_string(),
                message: format!("must not be negative, got {}", self.basic_salary),
            });
        }
        if self.hourly_rate < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "hourly_rate".to_string(),
                message: format!("must not be negative, got {}", self.hourly_rate),
            });
        }
        Ok(())
    }
}

/// Unchecked wire form of [`Employee`].
#[derive(Deserialize)]
struct RawEmployee {
    id: String,
    full_name: String,
    birthday: String,
    basic_salary: Decimal,
    hourly_rate: Decimal,
}

impl TryFrom<RawEmployee> for Employee {
    type Error = EngineError;

    fn try_from(raw: RawEmployee) -> EngineResult<Self> {
        Self::new(
            raw.id,
            raw.full_name,
            raw.birthday,
            raw.basic_salary,
            raw.hourly_rate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_test_employee() -> Employee {
        Employee::new("10003", "Lorna Reyes", "08/04/1990", dec!(20000), dec!(119.05)).unwrap()
    }

    #[test]
    fn test_new_accepts_zero_values() {
        let employee = Employee::new("10010", "Zero Pay", "", Decimal::ZERO, Decimal::ZERO);
        assert!(employee.is_ok());
    }

    #[test]
    fn test_new_rejects_negative_basic_salary() {
        let result = Employee::new("10010", "Bad Salary", "", dec!(-0.01), dec!(100));
        match result {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "basic_salary"),
            other => panic!("Expected InvalidEmployee error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_negative_hourly_rate() {
        let result = Employee::new("10010", "Bad Rate", "", dec!(100), dec!(-5));
        match result {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "hourly_rate"),
            other => panic!("Expected InvalidEmployee error, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_employee_with_string_decimals() {
        let json = r#"{
            "id": "10001",
            "full_name": "Andrea Dela Cruz",
            "birthday": "10/11/1983",
            "basic_salary": "90000",
            "hourly_rate": "535.71"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "10001");
        assert_eq!(employee.basic_salary, dec!(90000));
        assert_eq!(employee.hourly_rate, dec!(535.71));
    }

    #[test]
    fn test_deserialize_rejects_negative_values() {
        let json = r#"{
            "id": "10001",
            "full_name": "Andrea Dela Cruz",
            "birthday": "10/11/1983",
            "basic_salary": "-1",
            "hourly_rate": "535.71"
        }"#;

        let error = serde_json::from_str::<Employee>(json).unwrap_err();
        assert!(
            error.to_string().contains("Invalid employee field 'basic_salary'"),
            "error: {}",
            error
        );

        let json = json.replace("\"-1\"", "\"90000\"").replace("535.71", "-535.71");
        let error = serde_json::from_str::<Employee>(&json).unwrap_err();
        assert!(error.to_string().contains("'hourly_rate'"), "error: {}", error);
    }

    #[test]
    fn test_serialize_employee() {
        let employee = create_test_employee();
        let json = serde_json::to_value(&employee).unwrap();

        assert_eq!(json["full_name"], "Lorna Reyes");
        assert_eq!(json["birthday"], "08/04/1990");
        assert_eq!(json["hourly_rate"], "119.05");
    }
}

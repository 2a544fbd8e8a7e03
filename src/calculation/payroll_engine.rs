//! Payroll engine.
//!
//! This module combines the deduction rules, the withholding tax table and
//! the attendance aggregation into gross and net salary results for a
//! single employee.
//!
//! The engine borrows its lookups and holds no state between calls, so one
//! engine can serve any number of computations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, Employee};
use crate::store::{AttendanceLookup, EmployeeLookup};

use super::attendance::{AttendanceSummary, MINUTES_PER_HOUR, summarize_attendance};
use super::deductions::{DeductionResult, DeductionSchedule};
use super::withholding_tax::calculate_withholding_tax;

/// Breakdown of a net salary computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The employee the result is for, if computed through the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// The monthly basic salary the computation started from.
    pub basic_salary: Decimal,
    /// Each statutory deduction, in schedule order.
    pub deductions: Vec<DeductionResult>,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Basic salary less total deductions.
    pub taxable_income: Decimal,
    /// Withholding tax on the taxable income.
    pub withholding_tax: Decimal,
    /// Taxable income less withholding tax.
    pub net_salary: Decimal,
}

/// Result of an attendance-driven gross salary computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossSalaryResult {
    /// The employee the result is for.
    pub employee_id: String,
    /// The inclusive date range covered.
    pub date_range: DateRange,
    /// The hourly rate applied.
    pub hourly_rate: Decimal,
    /// Worked hours over the range (total minutes / 60).
    pub total_hours: Decimal,
    /// `total_hours * hourly_rate`.
    pub gross_salary: Decimal,
    /// The per-date breakdown the hours were taken from.
    pub attendance: AttendanceSummary,
}

/// Computes the net salary breakdown for a basic salary.
///
/// `net = basic - deductions(basic) - tax(basic - deductions(basic))`
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{DeductionSchedule, calculate_net_salary};
/// use rust_decimal::Decimal;
///
/// let result = calculate_net_salary(Decimal::new(20000, 0), &DeductionSchedule::standard());
///
/// assert_eq!(result.total_deductions, Decimal::new(1600, 0));
/// assert_eq!(result.withholding_tax, Decimal::ZERO);
/// assert_eq!(result.net_salary, Decimal::new(18400, 0));
/// ```
pub fn calculate_net_salary(basic_salary: Decimal, schedule: &DeductionSchedule) -> PayrollResult {
    let deductions = schedule.calculate(basic_salary);
    let total_deductions: Decimal = deductions.iter().map(|d| d.amount).sum();
    let taxable_income = basic_salary - total_deductions;
    let withholding_tax = calculate_withholding_tax(taxable_income);
    let net_salary = taxable_income - withholding_tax;

    PayrollResult {
        employee_id: None,
        basic_salary,
        deductions,
        total_deductions,
        taxable_income,
        withholding_tax,
        net_salary,
    }
}

/// Computes payroll figures against employee and attendance lookups.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayrollEngine;
/// use payroll_engine::models::Employee;
/// use payroll_engine::store::{AttendanceStore, EmployeeDirectory};
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
/// let employees: EmployeeDirectory = vec![employee].into_iter().collect();
/// let attendance = AttendanceStore::new();
///
/// let engine = PayrollEngine::new(&employees, &attendance);
/// let result = engine.compute_net_salary("10003").unwrap();
/// assert_eq!(result.net_salary, Decimal::new(18400, 0));
/// ```
#[derive(Debug)]
pub struct PayrollEngine<'a, E: ?Sized, A: ?Sized> {
    employees: &'a E,
    attendance: &'a A,
    deductions: DeductionSchedule,
}

impl<'a, E, A> PayrollEngine<'a, E, A>
where
    E: EmployeeLookup + ?Sized,
    A: AttendanceLookup + ?Sized,
{
    /// Creates an engine using the standard deduction schedule.
    pub fn new(employees: &'a E, attendance: &'a A) -> Self {
        Self::with_deductions(employees, attendance, DeductionSchedule::standard())
    }

    /// Creates an engine using a custom deduction schedule.
    pub fn with_deductions(
        employees: &'a E,
        attendance: &'a A,
        deductions: DeductionSchedule,
    ) -> Self {
        Self {
            employees,
            attendance,
            deductions,
        }
    }

    /// Returns the deduction schedule in use.
    pub fn deductions(&self) -> &DeductionSchedule {
        &self.deductions
    }

    /// Total statutory deductions for a basic salary.
    pub fn compute_total_deductions(&self, basic_salary: Decimal) -> Decimal {
        self.deductions.total(basic_salary)
    }

    /// Withholding tax for a taxable income.
    pub fn compute_withholding_tax(&self, taxable_income: Decimal) -> Decimal {
        calculate_withholding_tax(taxable_income)
    }

    /// Per-date worked time and total for an employee over `[start, end]`.
    ///
    /// An unknown employee yields an empty summary. Fails with
    /// `InvalidDateRange` if `start > end`.
    pub fn compute_hours_worked(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<AttendanceSummary> {
        let range = DateRange::new(start, end)?;
        Ok(summarize_attendance(
            self.attendance,
            employee_id,
            range.start,
            range.end,
        ))
    }

    /// Gross salary from worked hours over `[start, end]`.
    ///
    /// Fails with `EmployeeNotFound` for an unknown employee and with
    /// `InvalidDateRange` if `start > end`. Flagged attendance entries do not
    /// contribute hours. A rate too large for the worked minutes fails with
    /// `CalculationError`.
    pub fn compute_gross_salary(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<GrossSalaryResult> {
        let employee = self.find_employee(employee_id)?;
        let date_range = DateRange::new(start, end)?;

        let attendance = summarize_attendance(
            self.attendance,
            employee_id,
            date_range.start,
            date_range.end,
        );
        let total_hours = attendance.total_hours();
        let gross_salary = pay_for_minutes(attendance.total_minutes, employee.hourly_rate)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!(
                    "gross salary for employee '{}' overflows: {} minutes at {} per hour",
                    employee_id, attendance.total_minutes, employee.hourly_rate
                ),
            })?;

        debug!(
            employee_id = %employee_id,
            total_minutes = attendance.total_minutes,
            hourly_rate = %employee.hourly_rate,
            gross_salary = %gross_salary,
            "Computed gross salary"
        );

        Ok(GrossSalaryResult {
            employee_id: employee.id.clone(),
            date_range,
            hourly_rate: employee.hourly_rate,
            total_hours,
            gross_salary,
            attendance,
        })
    }

    /// Net salary breakdown from the employee's stored basic salary.
    ///
    /// Fails with `EmployeeNotFound` for an unknown employee.
    pub fn compute_net_salary(&self, employee_id: &str) -> EngineResult<PayrollResult> {
        let employee = self.find_employee(employee_id)?;

        let mut result = calculate_net_salary(employee.basic_salary, &self.deductions);
        result.employee_id = Some(employee.id.clone());

        debug!(
            employee_id = %employee_id,
            basic_salary = %result.basic_salary,
            total_deductions = %result.total_deductions,
            withholding_tax = %result.withholding_tax,
            net_salary = %result.net_salary,
            "Computed net salary"
        );

        Ok(result)
    }

    fn find_employee(&self, employee_id: &str) -> EngineResult<&'a Employee> {
        self.employees
            .get(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}

/// Pay for `minutes` at `hourly_rate`, or `None` on overflow.
///
/// Multiplies before dividing so that rates with two decimal places give
/// exact amounts whenever the true amount terminates.
fn pay_for_minutes(minutes: i64, hourly_rate: Decimal) -> Option<Decimal> {
    Decimal::from(minutes)
        .checked_mul(hourly_rate)?
        .checked_div(Decimal::from(MINUTES_PER_HOUR))
}

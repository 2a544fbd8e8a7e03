//! Calculation logic for the payroll engine.
//!
//! This module contains the statutory deduction rules (SSS, PhilHealth and
//! Pag-IBIG), the progressive withholding tax table, attendance aggregation
//! into worked minutes, and the [`PayrollEngine`] that combines them into
//! gross and net salary results.

mod attendance;
mod deductions;
mod payroll_engine;
mod withholding_tax;

pub use attendance::{
    AttendanceSummary, DailyHours, INVALID_TIME_ENTRY, WorkedMinutes, format_minutes,
    summarize_attendance, worked_minutes,
};
pub use deductions::{
    DeductionResult, DeductionRule, DeductionSchedule, SSS_CEILING_SALARY, SSS_FLOOR_SALARY,
    STANDARD_DEDUCTIONS, calculate_total_deductions,
};
pub use payroll_engine::{GrossSalaryResult, PayrollEngine, PayrollResult, calculate_net_salary};
pub use withholding_tax::{TAX_BRACKETS, TaxBracket, calculate_withholding_tax, find_tax_bracket};

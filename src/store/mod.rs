//! In-memory lookups over loaded employee and attendance data.
//!
//! The payroll engine only depends on the two capabilities defined here,
//! [`EmployeeLookup`] and [`AttendanceLookup`]. The concrete stores are
//! filled once by the data loader and then only read.

mod attendance;
mod employees;

use chrono::NaiveDate;

use crate::models::{AttendanceEntry, Employee};

pub use attendance::AttendanceStore;
pub use employees::EmployeeDirectory;

/// Read access to employee master data by identifier.
pub trait EmployeeLookup {
    /// Returns the employee with the given identifier, if present.
    fn get(&self, employee_id: &str) -> Option<&Employee>;
}

/// Read access to attendance entries by employee and date range.
pub trait AttendanceLookup {
    /// Returns the entries for `employee_id` dated within `[start, end]`,
    /// ordered by date.
    ///
    /// An unknown employee or an empty range (including `start > end`)
    /// yields an empty collection, never an error.
    fn entries_in_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<&AttendanceEntry>;
}

//! Attendance entry and warning models.
//!
//! This module contains the [`AttendanceEntry`] type recorded once per employee
//! per day, and the [`AttendanceWarning`] type used to surface entries that
//! were excluded from worked-time totals.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single day's login/logout record for an employee.
///
/// Times are same-day time-of-day values; there is no cross-midnight model.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceEntry;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let entry = AttendanceEntry {
///     employee_id: "10003".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     login: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     logout: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// };
/// assert!(!entry.is_inverted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// The employee this entry belongs to.
    pub employee_id: String,
    /// The calendar date of the entry.
    pub date: NaiveDate,
    /// Time of day the employee logged in.
    pub login: NaiveTime,
    /// Time of day the employee logged out.
    pub logout: NaiveTime,
}

impl AttendanceEntry {
    /// Returns true if the logout time precedes the login time.
    pub fn is_inverted(&self) -> bool {
        self.logout < self.login
    }
}

/// A warning raised while aggregating attendance.
///
/// Warnings never abort a computation; they describe entries that were
/// flagged and left out of totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceWarning {
    /// A code identifying the type of warning (e.g. "INVALID_TIME_ENTRY").
    pub code: String,
    /// The date of the affected entry.
    pub date: NaiveDate,
    /// A human-readable description of the warning.
    pub message: String,
}

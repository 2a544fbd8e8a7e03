//! Attendance aggregation.
//!
//! This module turns raw login/logout entries into worked minutes per day
//! and a total over a date range.
//!
//! Entries whose logout precedes their login are reported as
//! [`WorkedMinutes::Invalid`], left out of the total, and listed as
//! warnings on the [`AttendanceSummary`]. A bad entry never aborts the
//! aggregation.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::AttendanceWarning;
use crate::store::AttendanceLookup;

/// Warning code attached to entries excluded from totals.
pub const INVALID_TIME_ENTRY: &str = "INVALID_TIME_ENTRY";

pub(crate) const MINUTES_PER_HOUR: i64 = 60;

/// Worked time for a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "minutes", rename_all = "snake_case")]
pub enum WorkedMinutes {
    /// A well-formed entry and its length in minutes.
    Valid(i64),
    /// Logout precedes login; carries the raw (negative) difference.
    Invalid(i64),
}

impl WorkedMinutes {
    /// Returns the minutes for a valid entry, `None` for an invalid one.
    pub fn minutes(&self) -> Option<i64> {
        match self {
            WorkedMinutes::Valid(minutes) => Some(*minutes),
            WorkedMinutes::Invalid(_) => None,
        }
    }

    /// Returns true for a well-formed entry.
    pub fn is_valid(&self) -> bool {
        matches!(self, WorkedMinutes::Valid(_))
    }
}

impl fmt::Display for WorkedMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkedMinutes::Valid(minutes) => f.write_str(&format_minutes(*minutes)),
            WorkedMinutes::Invalid(_) => f.write_str("Invalid"),
        }
    }
}

/// Computes the minutes between login and logout on the same day.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{worked_minutes, WorkedMinutes};
/// use chrono::NaiveTime;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let six = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
///
/// assert_eq!(worked_minutes(nine, six), WorkedMinutes::Valid(540));
/// assert_eq!(worked_minutes(six, nine), WorkedMinutes::Invalid(-540));
/// ```
pub fn worked_minutes(login: NaiveTime, logout: NaiveTime) -> WorkedMinutes {
    let minutes = (logout - login).num_minutes();
    if logout < login {
        WorkedMinutes::Invalid(minutes)
    } else {
        WorkedMinutes::Valid(minutes)
    }
}

/// Formats a minute count as `hours:minutes`, e.g. `540` → `"9:00"`.
///
/// Negative counts format as `"Invalid"`.
pub fn format_minutes(minutes: i64) -> String {
    if minutes < 0 {
        return "Invalid".to_string();
    }
    format!(
        "{}:{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}

/// Worked time for one date in a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHours {
    /// The date of the entry.
    pub date: NaiveDate,
    /// Recorded login time.
    pub login: NaiveTime,
    /// Recorded logout time.
    pub logout: NaiveTime,
    /// Worked minutes, or the invalid marker.
    pub worked: WorkedMinutes,
}

/// Worked time for one employee over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee the summary is for.
    pub employee_id: String,
    /// First date of the queried range (inclusive).
    pub start_date: NaiveDate,
    /// Last date of the queried range (inclusive).
    pub end_date: NaiveDate,
    /// One row per recorded date, ordered by date.
    pub days: Vec<DailyHours>,
    /// Sum of all valid entries; invalid entries are excluded.
    pub total_minutes: i64,
    /// One warning per excluded entry.
    pub warnings: Vec<AttendanceWarning>,
}

impl AttendanceSummary {
    /// Total worked time in hours (`total_minutes / 60`).
    pub fn total_hours(&self) -> Decimal {
        Decimal::from(self.total_minutes) / Decimal::from(MINUTES_PER_HOUR)
    }

    /// Total worked time formatted as `hours:minutes`.
    pub fn formatted_total(&self) -> String {
        format_minutes(self.total_minutes)
    }

    /// Returns true if any entry was excluded from the total.
    pub fn has_invalid_entries(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Fails with `InvalidTimeEntry` for the first excluded entry, if any.
    ///
    /// For callers that want flagged entries to be fatal.
    pub fn ensure_valid(&self) -> EngineResult<()> {
        match self.days.iter().find(|day| !day.worked.is_valid()) {
            Some(day) => Err(EngineError::InvalidTimeEntry {
                employee_id: self.employee_id.clone(),
                date: day.date,
                message: format!(
                    "logout {} precedes login {}",
                    day.logout.format("%H:%M"),
                    day.login.format("%H:%M")
                ),
            }),
            None => Ok(()),
        }
    }
}

/// Aggregates an employee's attendance over the inclusive range `[start, end]`.
///
/// An unknown employee or an empty range (including `start > end`) yields an
/// empty summary with a zero total.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::summarize_attendance;
/// use payroll_engine::models::AttendanceEntry;
/// use payroll_engine::store::AttendanceStore;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let store: AttendanceStore = vec![AttendanceEntry {
///     employee_id: "10003".to_string(),
///     date,
///     login: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     logout: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
/// }]
/// .into_iter()
/// .collect();
///
/// let summary = summarize_attendance(&store, "10003", date, date);
/// assert_eq!(summary.total_minutes, 540);
/// assert_eq!(summary.formatted_total(), "9:00");
/// ```
pub fn summarize_attendance<A>(
    attendance: &A,
    employee_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> AttendanceSummary
where
    A: AttendanceLookup + ?Sized,
{
    let mut days = Vec::new();
    let mut warnings = Vec::new();
    let mut total_minutes = 0;

    for entry in attendance.entries_in_range(employee_id, start, end) {
        let worked = worked_minutes(entry.login, entry.logout);
        match worked {
            WorkedMinutes::Valid(minutes) => total_minutes += minutes,
            WorkedMinutes::Invalid(minutes) => {
                warn!(
                    employee_id = %employee_id,
                    date = %entry.date,
                    login = %entry.login,
                    logout = %entry.logout,
                    "Excluding attendance entry with logout before login"
                );
                warnings.push(AttendanceWarning {
                    code: INVALID_TIME_ENTRY.to_string(),
                    date: entry.date,
                    message: format!(
                        "logout {} precedes login {} ({} minutes); excluded from total",
                        entry.logout.format("%H:%M"),
                        entry.login.format("%H:%M"),
                        minutes
                    ),
                });
            }
        }
        days.push(DailyHours {
            date: entry.date,
            login: entry.login,
            logout: entry.logout,
            worked,
        });
    }

    debug!(
        employee_id = %employee_id,
        days = days.len(),
        total_minutes,
        excluded = warnings.len(),
        "Summarized attendance"
    );

    AttendanceSummary {
        employee_id: employee_id.to_string(),
        start_date: start,
        end_date: end,
        days,
        total_minutes,
        warnings,
    }
}

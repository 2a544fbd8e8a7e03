//! Date range model.
//!
//! This module contains the [`DateRange`] type that bounds attendance queries
//! and gross-pay computations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive range of calendar dates.
///
/// Ranges built through [`DateRange::new`] or deserialized always satisfy
/// `start <= end`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(range.num_days(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    /// The first date of the range (inclusive).
    pub start: NaiveDate,
    /// The last date of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, failing with `InvalidDateRange` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the number of calendar days covered by the range.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Unchecked wire form of [`DateRange`].
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = EngineError;

    fn try_from(raw: RawDateRange) -> EngineResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

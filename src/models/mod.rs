//! Core data models for the payroll engine.
//!
//! This module contains the domain records the engine reads from its lookups.

mod attendance;
mod date_range;
mod employee;

pub use attendance::{AttendanceEntry, AttendanceWarning};
pub use date_range::DateRange;
pub use employee::Employee;

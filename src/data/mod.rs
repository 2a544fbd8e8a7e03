//! Loading of employee and attendance records from CSV files.

mod loader;

pub use loader::{
    ATTENDANCE_COLUMNS, DataLoader, EMPLOYEE_MIN_COLUMNS, LoadReport, PayrollData, RejectedRow,
    parse_amount, parse_date,
};

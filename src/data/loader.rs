//! CSV data loading.
//!
//! This module provides the [`DataLoader`] type that reads employee master
//! data and attendance records into the in-memory stores.
//!
//! Rows that cannot be used are rejected individually: they are logged,
//! recorded in the [`LoadReport`], and skipped. Only a missing or unreadable
//! file fails the whole load.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::calculation::PayrollEngine;
use crate::config::{DataSources, FormatConfig, PayrollConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEntry, Employee};
use crate::store::{AttendanceStore, EmployeeDirectory};

/// Minimum column count of an employee row.
pub const EMPLOYEE_MIN_COLUMNS: usize = 19;

/// Exact column count of an attendance row.
pub const ATTENDANCE_COLUMNS: usize = 6;

// Employee file columns.
const EMP_ID: usize = 0;
const EMP_LAST_NAME: usize = 1;
const EMP_FIRST_NAME: usize = 2;
const EMP_BIRTHDAY: usize = 3;
const EMP_BASIC_SALARY: usize = 13;
const EMP_HOURLY_RATE: usize = 18;

// Attendance file columns; 1 and 2 repeat the name and are ignored.
const ATT_ID: usize = 0;
const ATT_DATE: usize = 3;
const ATT_LOGIN: usize = 4;
const ATT_LOGOUT: usize = 5;

/// Employee and attendance data loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct PayrollData {
    /// Employees keyed by employee number.
    pub employees: EmployeeDirectory,
    /// Attendance keyed by employee number, then date.
    pub attendance: AttendanceStore,
}

impl PayrollData {
    /// Returns an engine over this data using the standard deductions.
    pub fn engine(&self) -> PayrollEngine<'_, EmployeeDirectory, AttendanceStore> {
        PayrollEngine::new(&self.employees, &self.attendance)
    }
}

/// A row skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// The file the row came from.
    pub source: String,
    /// 1-based line number of the row.
    pub line: u64,
    /// Why the row was rejected.
    pub reason: String,
}

/// Summary of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Employee rows accepted.
    pub employees_loaded: usize,
    /// Attendance rows accepted, including rows later overwritten.
    pub attendance_loaded: usize,
    /// Attendance rows that replaced an earlier row for the same employee and date.
    pub attendance_overwritten: usize,
    /// Every rejected row, in file order.
    pub rejected: Vec<RejectedRow>,
}

impl LoadReport {
    fn reject(&mut self, source: &str, line: u64, reason: String) {
        warn!(source = %source, line, reason = %reason, "Rejected data row");
        self.rejected.push(RejectedRow {
            source: source.to_string(),
            line,
            reason,
        });
    }
}

/// Reads employee and attendance CSV files.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::data::DataLoader;
///
/// let config = ConfigLoader::load("./config/payroll.yaml")?;
/// let (data, report) = DataLoader::from_config(config.config()).load(&config.config().data)?;
/// println!("{} employees, {} rows rejected", data.employees.len(), report.rejected.len());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    formats: FormatConfig,
}

impl DataLoader {
    /// Creates a loader that parses dates and times with the given formats.
    pub fn new(formats: FormatConfig) -> Self {
        Self { formats }
    }

    /// Creates a loader from the `formats` section of a configuration.
    pub fn from_config(config: &PayrollConfig) -> Self {
        Self::new(config.formats.clone())
    }

    /// Loads both data files.
    ///
    /// Fails with `DataFileNotFound` if either file cannot be opened.
    pub fn load(&self, sources: &DataSources) -> EngineResult<(PayrollData, LoadReport)> {
        let mut report = LoadReport::default();

        let employees = self.load_employees(
            open(&sources.employees)?,
            &sources.employees,
            &mut report,
        )?;
        let attendance = self.load_attendance(
            open(&sources.attendance)?,
            &sources.attendance,
            &mut report,
        )?;

        info!(
            employees = report.employees_loaded,
            attendance = report.attendance_loaded,
            overwritten = report.attendance_overwritten,
            rejected = report.rejected.len(),
            "Loaded payroll data"
        );

        Ok((
            PayrollData {
                employees,
                attendance,
            },
            report,
        ))
    }

    /// Reads employee rows from any reader. `source` names it in errors.
    pub fn load_employees<R: Read>(
        &self,
        reader: R,
        source: &str,
        report: &mut LoadReport,
    ) -> EngineResult<EmployeeDirectory> {
        let mut directory = EmployeeDirectory::new();

        for row in csv_reader(reader).records() {
            let Some((line, record)) = read_row(row, source, report)? else {
                continue;
            };
            match parse_employee(&record) {
                Ok(employee) => {
                    if let Some(previous) = directory.insert(employee) {
                        warn!(
                            source = %source,
                            line,
                            employee_id = %previous.id,
                            "Duplicate employee number; keeping the later row"
                        );
                    }
                    report.employees_loaded += 1;
                }
                Err(reason) => report.reject(source, line, reason),
            }
        }

        Ok(directory)
    }

    /// Reads attendance rows from any reader. `source` names it in errors.
    ///
    /// A later row for the same employee and date replaces the earlier one.
    pub fn load_attendance<R: Read>(
        &self,
        reader: R,
        source: &str,
        report: &mut LoadReport,
    ) -> EngineResult<AttendanceStore> {
        let mut store = AttendanceStore::new();

        for row in csv_reader(reader).records() {
            let Some((line, record)) = read_row(row, source, report)? else {
                continue;
            };
            match self.parse_attendance(&record) {
                Ok(entry) => {
                    if let Some(previous) = store.insert(entry) {
                        warn!(
                            source = %source,
                            line,
                            employee_id = %previous.employee_id,
                            date = %previous.date,
                            "Duplicate attendance entry; keeping the later row"
                        );
                        report.attendance_overwritten += 1;
                    }
                    report.attendance_loaded += 1;
                }
                Err(reason) => report.reject(source, line, reason),
            }
        }

        Ok(store)
    }

    fn parse_attendance(&self, record: &StringRecord) -> Result<AttendanceEntry, String> {
        if record.len() != ATTENDANCE_COLUMNS {
            return Err(format!(
                "expected {} columns, found {}",
                ATTENDANCE_COLUMNS,
                record.len()
            ));
        }

        let employee_id = required(record, ATT_ID, "employee number")?;
        let date_text = field(record, ATT_DATE);
        let date = NaiveDate::parse_from_str(date_text, &self.formats.date).map_err(|_| {
            format!(
                "invalid date '{}': expected format {}",
                date_text, self.formats.date
            )
        })?;

        Ok(AttendanceEntry {
            employee_id: employee_id.to_string(),
            date,
            login: self.parse_time(field(record, ATT_LOGIN), "login")?,
            logout: self.parse_time(field(record, ATT_LOGOUT), "logout")?,
        })
    }

    fn parse_time(&self, value: &str, label: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(value, &self.formats.time).map_err(|_| {
            format!(
                "invalid {} time '{}': expected format {}",
                label, value, self.formats.time
            )
        })
    }
}

/// Parses a date with the given `chrono` format, failing with `InvalidDate`.
///
/// # Example
///
/// ```
/// use payroll_engine::data::parse_date;
///
/// let date = parse_date("06/03/2024", "%m/%d/%Y").unwrap();
/// assert_eq!(date.to_string(), "2024-06-03");
/// assert!(parse_date("2024-06-03", "%m/%d/%Y").is_err());
/// ```
pub fn parse_date(value: &str, format: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), format).map_err(|_| EngineError::InvalidDate {
        value: value.to_string(),
        format: format.to_string(),
    })
}

/// Parses an amount such as `"90,000"` or `535.71`, dropping separators and quotes.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '"')
        .collect();
    Decimal::from_str(&cleaned).ok()
}

fn open(path: &str) -> EngineResult<File> {
    File::open(Path::new(path)).map_err(|_| EngineError::DataFileNotFound {
        path: path.to_string(),
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

/// Unpacks one CSV row. I/O failures abort the load; malformed rows are
/// rejected and yield `None`.
fn read_row(
    row: Result<StringRecord, csv::Error>,
    source: &str,
    report: &mut LoadReport,
) -> EngineResult<Option<(u64, StringRecord)>> {
    match row {
        Ok(record) => {
            let line = record.position().map_or(0, |p| p.line());
            Ok(Some((line, record)))
        }
        Err(err) => {
            let line = err.position().map_or(0, |p| p.line());
            if err.is_io_error() {
                return Err(EngineError::DataParseError {
                    path: source.to_string(),
                    line,
                    message: err.to_string(),
                });
            }
            report.reject(source, line, err.to_string());
            Ok(None)
        }
    }
}

fn parse_employee(record: &StringRecord) -> Result<Employee, String> {
    if record.len() < EMPLOYEE_MIN_COLUMNS {
        return Err(format!(
            "expected at least {} columns, found {}",
            EMPLOYEE_MIN_COLUMNS,
            record.len()
        ));
    }

    let id = required(record, EMP_ID, "employee number")?;
    let full_name = format!(
        "{} {}",
        field(record, EMP_FIRST_NAME),
        field(record, EMP_LAST_NAME)
    );
    let basic_salary = amount(record, EMP_BASIC_SALARY, "basic salary")?;
    let hourly_rate = amount(record, EMP_HOURLY_RATE, "hourly rate")?;

    Employee::new(
        id,
        full_name,
        field(record, EMP_BIRTHDAY),
        basic_salary,
        hourly_rate,
    )
    .map_err(|e| e.to_string())
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or_default()
}

fn required<'r>(record: &'r StringRecord, index: usize, label: &str) -> Result<&'r str, String> {
    match field(record, index) {
        "" => Err(format!("missing {}", label)),
        value => Ok(value),
    }
}

fn amount(record: &StringRecord, index: usize, label: &str) -> Result<Decimal, String> {
    let value = field(record, index);
    parse_amount(value).ok_or_else(|| format!("invalid {} '{}'", label, value))
}

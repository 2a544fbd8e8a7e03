//! Configuration types for the payroll engine.
//!
//! These types map directly to the YAML configuration file. Every section
//! and key has a default, so a partial file (or an empty one) is valid.

use serde::{Deserialize, Serialize};

/// Default path of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/payroll.yaml";

/// The complete payroll configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Where employee and attendance records are read from.
    pub data: DataSources,
    /// Text formats for dates and times in the data files.
    pub formats: FormatConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Paths of the CSV data files, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// Employee master data file.
    pub employees: String,
    /// Attendance records file.
    pub attendance: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            employees: "data/employees.csv".to_string(),
            attendance: "data/attendance.csv".to_string(),
        }
    }
}

/// `chrono` format strings used when parsing data files and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Calendar date format, e.g. `06/03/2024`.
    pub date: String,
    /// Time-of-day format, e.g. `08:30`.
    pub time: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            date: "%m/%d/%Y".to_string(),
            time: "%H:%M".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

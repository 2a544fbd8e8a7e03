//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::calculation::PayrollEngine;
use crate::data::PayrollData;
use crate::store::{AttendanceStore, EmployeeDirectory};

/// Shared application state.
///
/// Holds the loaded employee and attendance data, read-only for the
/// lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    data: Arc<PayrollData>,
}

impl AppState {
    /// Creates a new application state over loaded data.
    pub fn new(data: PayrollData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// Returns the loaded data.
    pub fn data(&self) -> &PayrollData {
        &self.data
    }

    /// Returns an engine over the loaded data.
    pub fn engine(&self) -> PayrollEngine<'_, EmployeeDirectory, AttendanceStore> {
        self.data.engine()
    }
}

//! Payroll computation engine.
//!
//! This crate computes Philippine statutory deductions (SSS, PhilHealth and
//! Pag-IBIG), progressive withholding tax, worked hours from attendance
//! records, and the gross and net salaries derived from them.
//!
//! Employee and attendance data are loaded from CSV files into read-only
//! stores; the [`calculation::PayrollEngine`] then answers queries against
//! them. An HTTP API and a command line front end sit on top.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod store;

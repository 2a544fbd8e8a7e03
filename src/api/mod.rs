//! HTTP API module for the payroll engine.
//!
//! This module exposes employee lookup and the payroll computations as
//! JSON endpoints over the loaded data.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceRangeRequest, DeductionsRequest, NetSalaryRequest, WithholdingTaxRequest,
};
pub use response::{ApiError, ApiErrorResponse, DeductionsResponse, WithholdingTaxResponse};
pub use state::AppState;

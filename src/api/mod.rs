//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints the surrounding system calls:
//! single-payslip recomputation, whole-period generation and payslip
//! approval. All behavior lives in [`crate::engine`]; the handlers only
//! translate between JSON and engine calls.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculatePayslipRequest, GeneratePeriodRequest};
pub use response::{ApiError, CalculationResponse};
pub use state::AppState;

//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions: attendance
//! proration, per-component amount resolution, statutory contribution
//! formulas, loan amortization arithmetic, overtime pay, and the currency
//! rounding rule shared by all of them. Everything here is side-effect
//! free; orchestration and persistence live in [`crate::engine`] and
//! [`crate::store`].

mod components;
mod loan_schedule;
mod overtime;
mod proration;
mod rounding;
mod statutory;

pub use components::{prorate_base, resolve_allocation};
pub use loan_schedule::{emi_amount, first_due_month, schedule_months, total_payable};
pub use overtime::overtime_pay;
pub use proration::{ProrationResult, calculate_proration};
pub use rounding::round_currency;
pub use statutory::{health_insurance_contribution, provident_fund_contribution};

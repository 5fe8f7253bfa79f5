//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Conditions that are part of normal payroll processing (a missing salary
//! assignment, a degenerate period with zero working days, a loan that is
//! not eligible for schedule generation) are modeled as outcome enums on
//! the operations that produce them, not as errors.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
/// use uuid::Uuid;
///
/// let error = EngineError::EmployeeNotFound { id: Uuid::nil() };
/// assert_eq!(
///     error.to_string(),
///     "Employee not found: 00000000-0000-0000-0000-000000000000"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Statutory settings file was not found at the specified path.
    #[error("Settings file not found: {path}")]
    SettingsNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Statutory settings file could not be parsed.
    #[error("Failed to parse settings file '{path}': {message}")]
    SettingsParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee identifier.
        id: Uuid,
    },

    /// No payroll period exists with the given identifier.
    #[error("Payroll period not found: {id}")]
    PeriodNotFound {
        /// The period identifier.
        id: Uuid,
    },

    /// No payslip exists with the given identifier.
    #[error("Payslip not found: {id}")]
    PayslipNotFound {
        /// The payslip identifier.
        id: Uuid,
    },

    /// No loan exists with the given identifier.
    #[error("Loan not found: {id}")]
    LoanNotFound {
        /// The loan identifier.
        id: Uuid,
    },

    /// A payroll period was requested for a month outside 1..=12.
    #[error("Invalid month: {month}")]
    InvalidMonth {
        /// The rejected month value.
        month: u32,
    },

    /// A status transition was requested that the entity's state machine
    /// does not allow.
    #[error("Invalid {entity} transition: {from} -> {to}")]
    InvalidTransition {
        /// The kind of entity ("payslip", "period").
        entity: String,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// A general calculation error occurred. Raising this inside a store
    /// transaction rolls the payslip back to its pre-calculation state.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

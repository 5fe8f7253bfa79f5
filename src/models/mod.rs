//! Core data models for the payroll engine.
//!
//! This module contains all the domain entities used throughout the engine.

mod adhoc;
mod assignment;
mod attendance;
mod component;
mod employee;
mod loan;
mod payslip;
mod period;

pub use adhoc::{AdhocPayment, AdhocStatus};
pub use assignment::{ComponentAllocation, SalaryAssignment};
pub use attendance::AttendanceSummary;
pub use component::{CalculationType, ComponentKind, SalaryComponent, StatutoryType};
pub use employee::Employee;
pub use loan::{Emi, EmiStatus, Loan, LoanStatus, LoanType};
pub use payslip::{Payslip, PayslipLineItem, PayslipStatus};
pub use period::{PayrollPeriod, PeriodStatus, PeriodTotals};

//! Payroll period model.
//!
//! A [`PayrollPeriod`] identifies one `(organization, month, year)` payroll
//! cycle and carries aggregate totals over all of its payslips. Totals are
//! always recomputed by re-aggregation, never incremented in place, so a
//! retried employee calculation can never make them drift.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Lifecycle of a payroll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Created but not yet processed.
    Draft,
    /// A batch run is in progress.
    Processing,
    /// All employees have been processed.
    Completed,
    /// Salaries have been disbursed.
    Paid,
    /// The period was abandoned.
    Cancelled,
}

/// Aggregate totals over all payslips in a period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Sum of gross earnings across payslips.
    pub gross_earnings: Decimal,
    /// Sum of total deductions across payslips.
    pub total_deductions: Decimal,
    /// Sum of net salaries across payslips.
    pub net_salary: Decimal,
    /// Number of non-cancelled payslips in the period.
    pub payslip_count: u32,
}

/// One `(organization, month, year)` payroll cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Unique identifier for the period.
    pub id: Uuid,
    /// The organization the period belongs to.
    pub organization_id: Uuid,
    /// Calendar month, 1..=12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Payable days in the period. Defaults to the calendar-day count of
    /// the month; an attendance record may override it per employee.
    pub working_days: u32,
    /// Lifecycle status.
    pub status: PeriodStatus,
    /// Aggregate totals, recomputed after each payslip commit.
    pub totals: PeriodTotals,
}

impl PayrollPeriod {
    /// Creates a draft period for the given organization and month.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn new(organization_id: Uuid, month: u32, year: i32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth { month });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id,
            month,
            year,
            working_days: days_in_month(year, month),
            status: PeriodStatus::Draft,
            totals: PeriodTotals::default(),
        })
    }
}

/// Number of calendar days in a month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let first = chrono::NaiveDate::from_ymd_opt(year, month, 1)
        .expect("month validated to 1..=12");
    let next = if month == 12 {
        chrono::NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        chrono::NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("month validated to 1..=12");
    (next - first).num_days() as u32
}

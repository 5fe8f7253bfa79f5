//! Attendance summary model.
//!
//! The attendance source collaborator yields one [`AttendanceSummary`] per
//! employee per payroll period. The engine derives loss-of-pay days from it;
//! everything else about attendance capture lives outside this crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee's attendance for one payroll period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Number of payable days in the period.
    pub working_days: u32,
    /// Days the employee was present.
    pub present_days: Decimal,
    /// Approved leave days overlapping the period.
    pub leave_days: Decimal,
    /// Days the employee was absent.
    pub absent_days: Decimal,
    /// Overtime hours worked in the period.
    pub overtime_hours: Decimal,
}

impl AttendanceSummary {
    /// Returns a summary representing full attendance over `working_days`.
    ///
    /// Used when no attendance record exists for an employee in a period.
    pub fn full(working_days: u32) -> Self {
        Self {
            working_days,
            present_days: Decimal::from(working_days),
            leave_days: Decimal::ZERO,
            absent_days: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
        }
    }

    /// Unpaid absence days beyond approved leave.
    ///
    /// `max(0, absent_days - leave_days)`: approved leave soaks up absence
    /// before any pay is lost.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::AttendanceSummary;
    /// use rust_decimal::Decimal;
    ///
    /// let mut attendance = AttendanceSummary::full(28);
    /// attendance.absent_days = Decimal::new(9, 0);
    /// attendance.leave_days = Decimal::new(2, 0);
    /// assert_eq!(attendance.loss_of_pay_days(), Decimal::new(7, 0));
    /// ```
    pub fn loss_of_pay_days(&self) -> Decimal {
        (self.absent_days - self.leave_days).max(Decimal::ZERO)
    }
}

//! Payslip and line item models.
//!
//! A [`Payslip`] is one employee's result for one payroll period. It
//! exclusively owns its [`PayslipLineItem`]s. After assembly the invariant
//! `net_salary = gross_earnings - total_deductions` always holds, and at
//! most one line item exists per `(payslip, component)` pair.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ComponentKind, SalaryComponent, StatutoryType};

/// Lifecycle of a payslip, independent of its period's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayslipStatus {
    /// Computed and open for recomputation.
    Generated,
    /// Signed off; linked EMIs and ad-hoc payments are settled.
    Approved,
    /// Disbursed to the employee.
    Paid,
    /// Abandoned; linked EMIs and ad-hoc payments are released.
    Cancelled,
}

/// One resolved component amount attached to a payslip.
///
/// Component attributes are denormalized onto the line item so a payslip is
/// self-contained for display and total recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipLineItem {
    /// The component this amount was resolved from.
    pub component_id: Uuid,
    /// Component code at resolution time.
    pub component_code: String,
    /// Component name at resolution time.
    pub component_name: String,
    /// Earning or deduction.
    pub kind: ComponentKind,
    /// Statutory scheme tag carried from the component.
    pub statutory_type: StatutoryType,
    /// The resolved amount, always non-negative; `kind` decides the sign
    /// of its contribution to net salary.
    pub amount: Decimal,
    /// Manually entered items survive recomputation untouched.
    pub is_manual: bool,
}

/// One employee's payroll result for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for the payslip.
    pub id: Uuid,
    /// The employee this payslip belongs to.
    pub employee_id: Uuid,
    /// The payroll period this payslip belongs to.
    pub period_id: Uuid,
    /// Lifecycle status.
    pub status: PayslipStatus,
    /// Payable days used for proration.
    pub working_days: u32,
    /// Days present, snapshot from attendance.
    pub present_days: Decimal,
    /// Approved leave days, snapshot from attendance.
    pub leave_days: Decimal,
    /// Derived unpaid absence days.
    pub loss_of_pay_days: Decimal,
    /// Overtime hours, snapshot from attendance.
    pub overtime_hours: Decimal,
    /// Prorated base salary.
    pub base_pay: Decimal,
    /// Base pay plus all earning line items.
    pub gross_earnings: Decimal,
    /// Sum of all deduction line items.
    pub total_deductions: Decimal,
    /// `gross_earnings - total_deductions`.
    pub net_salary: Decimal,
    /// Full-attendance earnings minus actual earnings.
    pub loss_of_pay_deduction: Decimal,
    /// Sum of statutory-tagged deduction line items.
    pub statutory_deductions: Decimal,
    /// Sum recovered this period against advance-type loans.
    pub advance_recovery: Decimal,
    /// Overtime pay included in gross earnings.
    pub overtime_amount: Decimal,
    /// Owned line items; cascade-deleted with the payslip.
    pub line_items: Vec<PayslipLineItem>,
}

impl Payslip {
    /// Creates an empty payslip at default zero values.
    pub fn new(employee_id: Uuid, period_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            period_id,
            status: PayslipStatus::Generated,
            working_days: 0,
            present_days: Decimal::ZERO,
            leave_days: Decimal::ZERO,
            loss_of_pay_days: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            base_pay: Decimal::ZERO,
            gross_earnings: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            loss_of_pay_deduction: Decimal::ZERO,
            statutory_deductions: Decimal::ZERO,
            advance_recovery: Decimal::ZERO,
            overtime_amount: Decimal::ZERO,
            line_items: Vec::new(),
        }
    }

    /// Looks up the line item for a component, if any.
    pub fn line_item(&self, component_id: Uuid) -> Option<&PayslipLineItem> {
        self.line_items
            .iter()
            .find(|item| item.component_id == component_id)
    }

    /// Returns true if a line item tagged with the given statutory scheme
    /// exists on the payslip.
    pub fn has_statutory_item(&self, statutory_type: StatutoryType) -> bool {
        self.line_items
            .iter()
            .any(|item| item.statutory_type == statutory_type)
    }

    /// Drops every system-generated line item, keeping manual entries.
    pub fn clear_generated_items(&mut self) {
        self.line_items.retain(|item| item.is_manual);
    }

    /// Adds a system-generated amount for a component, aggregating into an
    /// existing generated line item for the same component.
    ///
    /// Returns `false` without modifying anything when the component's slot
    /// is occupied by a manually entered item: manual entries win and must
    /// not be silently inflated, or recomputation would double-count.
    pub fn apply_generated_amount(
        &mut self,
        component: &SalaryComponent,
        amount: Decimal,
    ) -> bool {
        if let Some(item) = self
            .line_items
            .iter_mut()
            .find(|item| item.component_id == component.id)
        {
            if item.is_manual {
                return false;
            }
            item.amount += amount;
        } else {
            self.line_items.push(PayslipLineItem {
                component_id: component.id,
                component_code: component.code.clone(),
                component_name: component.name.clone(),
                kind: component.kind,
                statutory_type: component.statutory_type,
                amount,
                is_manual: false,
            });
        }
        true
    }
}

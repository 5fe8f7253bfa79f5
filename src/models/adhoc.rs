//! Ad-hoc payment model.
//!
//! An [`AdhocPayment`] is a one-time amount (bonus, incentive, recovery)
//! outside the recurring salary structure. Linkage to a payslip is eager;
//! the status flips to `Processed` only when the payslip is approved, so a
//! recomputation between merge and approval can still re-link it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of an ad-hoc payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdhocStatus {
    /// Awaiting inclusion in a payroll cycle.
    Pending,
    /// Settled through an approved payslip.
    Processed,
    /// Withdrawn before processing.
    Cancelled,
}

/// A one-time payment for an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdhocPayment {
    /// Unique identifier for the payment.
    pub id: Uuid,
    /// The employee the payment is for.
    pub employee_id: Uuid,
    /// Display label, e.g. "Diwali Bonus".
    pub label: String,
    /// Payment amount, always positive; the target component's kind decides
    /// whether it raises earnings or deductions.
    pub amount: Decimal,
    /// Explicit target component, if the creator chose one.
    pub component_id: Option<Uuid>,
    /// Pin to a specific period; unpinned payments are consumed by the next
    /// period processed for the employee.
    pub payroll_period_id: Option<Uuid>,
    /// Lifecycle status.
    pub status: AdhocStatus,
    /// The payslip this payment was merged into, if any.
    pub processed_in_payslip: Option<Uuid>,
}

impl AdhocPayment {
    /// Creates a pending, unpinned payment.
    pub fn new(employee_id: Uuid, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            label: label.into(),
            amount,
            component_id: None,
            payroll_period_id: None,
            status: AdhocStatus::Pending,
            processed_in_payslip: None,
        }
    }

    /// The component code this payment maps to by naming convention:
    /// uppercased label with every non-alphanumeric run collapsed to one
    /// underscore.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::AdhocPayment;
    /// use rust_decimal::Decimal;
    ///
    /// let payment = AdhocPayment::new(uuid::Uuid::new_v4(), "Referral Bonus", Decimal::ONE);
    /// assert_eq!(payment.convention_code(), "REFERRAL_BONUS");
    /// ```
    pub fn convention_code(&self) -> String {
        let mut code = String::with_capacity(self.label.len());
        let mut last_was_separator = true;
        for ch in self.label.chars() {
            if ch.is_ascii_alphanumeric() {
                code.extend(ch.to_uppercase());
                last_was_separator = false;
            } else if !last_was_separator {
                code.push('_');
                last_was_separator = true;
            }
        }
        code.trim_end_matches('_').to_string()
    }
}

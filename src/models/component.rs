//! Salary component catalog model.
//!
//! A [`SalaryComponent`] is a named, reusable definition of one earning or
//! deduction head. Components are reference data: created by administrators,
//! never deleted while a salary assignment or payslip line item references
//! them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a component adds to or subtracts from an employee's pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// The component adds to gross earnings.
    Earning,
    /// The component adds to total deductions.
    Deduction,
}

/// How a component's final amount is derived from its allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    /// The allocated amount is used unchanged.
    Fixed,
    /// The allocated amount is a pre-computed absolute value derived from a
    /// percentage of base salary. Prorated by the attendance ratio when the
    /// component is attendance sensitive.
    PercentageOfBase,
    /// The allocated amount is scaled by the attendance proration ratio.
    AttendanceProrated,
    /// The allocated amount is a daily rate multiplied by paid days.
    PerDay,
}

/// The statutory scheme a component belongs to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatutoryType {
    /// Provident-fund-style retirement contribution.
    ProvidentFund,
    /// Health-insurance-style contribution.
    HealthInsurance,
    /// Income tax withheld at source.
    IncomeTax,
    /// Some other mandated deduction.
    Other,
    /// Not a statutory component.
    None,
}

/// A reusable salary component definition.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CalculationType, ComponentKind, SalaryComponent, StatutoryType};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let hra = SalaryComponent {
///     id: Uuid::new_v4(),
///     code: "HRA".to_string(),
///     name: "House Rent Allowance".to_string(),
///     kind: ComponentKind::Earning,
///     calculation_type: CalculationType::PercentageOfBase,
///     is_statutory: false,
///     statutory_type: StatutoryType::None,
///     default_amount: Decimal::ZERO,
///     default_percentage: Decimal::new(40, 0),
///     attendance_sensitive: true,
/// };
/// assert!(hra.is_earning());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Unique identifier for the component.
    pub id: Uuid,
    /// Short stable code (e.g. "HRA", "LOAN_EMI").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Earning or deduction.
    pub kind: ComponentKind,
    /// How the final amount is derived from the allocation.
    pub calculation_type: CalculationType,
    /// Whether the component represents a mandated contribution.
    pub is_statutory: bool,
    /// The statutory scheme, [`StatutoryType::None`] for regular components.
    pub statutory_type: StatutoryType,
    /// Default allocation amount used when an assignment gives none.
    pub default_amount: Decimal,
    /// Default percentage used when an assignment gives none.
    pub default_percentage: Decimal,
    /// Whether the resolved amount shrinks with unpaid absence. Percentage
    /// components default to `true`; setting `false` makes the component a
    /// flat entitlement independent of attendance.
    pub attendance_sensitive: bool,
}

impl SalaryComponent {
    /// Returns true if the component adds to gross earnings.
    pub fn is_earning(&self) -> bool {
        self.kind == ComponentKind::Earning
    }

    /// Returns true if the component subtracts from net salary.
    pub fn is_deduction(&self) -> bool {
        self.kind == ComponentKind::Deduction
    }
}

//! Statutory settings types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee-side provident fund contribution rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvidentFundRule {
    /// Whether the scheme applies to the organization.
    pub enabled: bool,
    /// Contribution rate as a percentage, e.g. 12 means 12%.
    pub employee_rate: Decimal,
    /// Monthly wage ceiling for the scheme.
    pub wage_ceiling: Decimal,
    /// When set, the contribution base is capped at the ceiling; otherwise
    /// the full prorated base is used.
    pub restrict_base_to_ceiling: bool,
}

/// Employee-side health insurance contribution rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthInsuranceRule {
    /// Whether the scheme applies to the organization.
    pub enabled: bool,
    /// Contribution rate as a percentage, e.g. 0.75 means 0.75%.
    pub employee_rate: Decimal,
    /// Gross-earnings eligibility ceiling; employees earning above it are
    /// outside the scheme.
    pub wage_ceiling: Decimal,
}

/// Overtime pay rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRule {
    /// Multiplier on the derived hourly rate, e.g. 2 for double pay.
    pub multiplier: Decimal,
    /// Hours in a standard working day, used to derive the hourly rate.
    pub standard_daily_hours: Decimal,
}

impl Default for OvertimeRule {
    fn default() -> Self {
        Self {
            multiplier: Decimal::from(2),
            standard_daily_hours: Decimal::from(8),
        }
    }
}

/// Per-organization statutory deduction settings.
///
/// A missing settings row means the statutory engine is disabled for the
/// organization; that is a configuration state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatutorySettings {
    /// Provident fund rule.
    pub provident_fund: ProvidentFundRule,
    /// Health insurance rule.
    pub health_insurance: HealthInsuranceRule,
    /// When false, income-tax-tagged generated line items are stripped from
    /// payslips so tax can be entered manually.
    #[serde(default)]
    pub auto_income_tax: bool,
    /// Overtime pay rule.
    #[serde(default)]
    pub overtime: OvertimeRule,
}

impl StatutorySettings {
    /// Settings with every scheme switched off. Useful as a neutral
    /// baseline in tests and for organizations outside both schemes.
    pub fn disabled() -> Self {
        Self {
            provident_fund: ProvidentFundRule {
                enabled: false,
                employee_rate: Decimal::ZERO,
                wage_ceiling: Decimal::ZERO,
                restrict_base_to_ceiling: false,
            },
            health_insurance: HealthInsuranceRule {
                enabled: false,
                employee_rate: Decimal::ZERO,
                wage_ceiling: Decimal::ZERO,
            },
            auto_income_tax: false,
            overtime: OvertimeRule::default(),
        }
    }
}

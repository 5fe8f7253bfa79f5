//! Statutory contribution formulas.
//!
//! Employee-side contribution amounts for the provident-fund-style and
//! health-insurance-style schemes. Both return `None` for "not applicable"
//! (scheme disabled, wage outside eligibility, or amount rounding to zero)
//! so the caller never stores zero rows.

use rust_decimal::Decimal;

use crate::config::{HealthInsuranceRule, ProvidentFundRule};

use super::rounding::round_currency;

/// Computes the employee-side provident fund contribution.
///
/// The contribution base is the prorated base salary, capped at the wage
/// ceiling when the rule restricts it. `amount = base x rate / 100`,
/// rounded to 2 decimal places.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::provident_fund_contribution;
/// use payroll_engine::config::ProvidentFundRule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rule = ProvidentFundRule {
///     enabled: true,
///     employee_rate: Decimal::from_str("12").unwrap(),
///     wage_ceiling: Decimal::from_str("15000").unwrap(),
///     restrict_base_to_ceiling: true,
/// };
/// let amount = provident_fund_contribution(&rule, Decimal::from_str("37500").unwrap());
/// assert_eq!(amount, Some(Decimal::from_str("1800.00").unwrap()));
/// ```
pub fn provident_fund_contribution(
    rule: &ProvidentFundRule,
    prorated_base: Decimal,
) -> Option<Decimal> {
    if !rule.enabled {
        return None;
    }
    let base = if rule.restrict_base_to_ceiling {
        prorated_base.min(rule.wage_ceiling)
    } else {
        prorated_base
    };
    let amount = round_currency(base * rule.employee_rate / Decimal::ONE_HUNDRED);
    (amount > Decimal::ZERO).then_some(amount)
}

/// Computes the employee-side health insurance contribution.
///
/// The scheme only applies while gross earnings stay at or under the wage
/// ceiling; above it the employee leaves the scheme entirely and no amount
/// is due. The contribution base is the full gross earnings.
pub fn health_insurance_contribution(
    rule: &HealthInsuranceRule,
    gross_earnings: Decimal,
) -> Option<Decimal> {
    if !rule.enabled || gross_earnings > rule.wage_ceiling {
        return None;
    }
    let amount = round_currency(gross_earnings * rule.employee_rate / Decimal::ONE_HUNDRED);
    (amount > Decimal::ZERO).then_some(amount)
}

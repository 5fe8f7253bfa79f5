//! Overtime pay calculation.

use rust_decimal::Decimal;

use crate::config::OvertimeRule;

use super::rounding::round_currency;

/// Computes overtime pay from the monthly base salary.
///
/// The hourly rate is derived as `base / (working_days x standard daily
/// hours)`; overtime hours are paid at that rate times the configured
/// multiplier. Zero working days or non-positive overtime hours yield zero.
pub fn overtime_pay(
    base_amount: Decimal,
    working_days: u32,
    overtime_hours: Decimal,
    rule: &OvertimeRule,
) -> Decimal {
    if working_days == 0 || overtime_hours <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let period_hours = Decimal::from(working_days) * rule.standard_daily_hours;
    if period_hours <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let hourly_rate = base_amount / period_hours;
    round_currency(hourly_rate * rule.multiplier * overtime_hours)
}

//! Currency rounding rule.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to 2 decimal places, half away from zero.
///
/// Every stored payroll amount passes through this function so that line
/// items, rollups and totals agree to the paisa.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let raw = Decimal::from_str("1833.3333").unwrap();
/// assert_eq!(round_currency(raw), Decimal::from_str("1833.33").unwrap());
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

//! Attendance proration.
//!
//! Converts a period's working-day count and loss-of-pay days into a
//! dimensionless proration ratio and a paid-day count. This is the single
//! place attendance touches money: every attendance-sensitive amount in the
//! engine is scaled by the ratio (or the paid days) produced here.

use rust_decimal::Decimal;

/// The result of prorating a pay period.
#[derive(Debug, Clone, PartialEq)]
pub struct ProrationResult {
    /// Days actually paid: `working_days - loss_of_pay_days`, floored at 0.
    pub paid_days: Decimal,
    /// Fraction of the period paid, always within `[0, 1]`.
    pub ratio: Decimal,
}

impl ProrationResult {
    /// A full-attendance result over `working_days`, ratio 1.
    pub fn full(working_days: u32) -> Self {
        Self {
            paid_days: Decimal::from(working_days),
            ratio: Decimal::ONE,
        }
    }
}

/// Computes the proration ratio and paid days for a period.
///
/// Zero working days is a degenerate period, not an error: the result has
/// ratio 0 and 0 paid days, which zeroes out every attendance-sensitive
/// amount downstream. Loss-of-pay days are clamped to `[0, working_days]`
/// so the ratio can never leave `[0, 1]`.
///
/// # Arguments
///
/// * `working_days` - Number of payable days in the period
/// * `loss_of_pay_days` - Unpaid absence days, may be fractional
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_proration;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let proration = calculate_proration(28, Decimal::from_str("7").unwrap());
/// assert_eq!(proration.paid_days, Decimal::from_str("21").unwrap());
/// assert_eq!(proration.ratio, Decimal::from_str("0.75").unwrap());
/// ```
pub fn calculate_proration(working_days: u32, loss_of_pay_days: Decimal) -> ProrationResult {
    if working_days == 0 {
        return ProrationResult {
            paid_days: Decimal::ZERO,
            ratio: Decimal::ZERO,
        };
    }

    let working = Decimal::from(working_days);
    let lop = loss_of_pay_days.max(Decimal::ZERO).min(working);
    let paid_days = working - lop;

    ProrationResult {
        paid_days,
        ratio: paid_days / working,
    }
}

//! Per-component amount resolution.
//!
//! Given a component definition, its allocated amount and the period's
//! proration, these functions compute the final amount that lands on a
//! payslip line item. The base salary is not a component; it has its own
//! entry point and is always prorated.

use rust_decimal::Decimal;

use crate::models::{CalculationType, SalaryComponent};

use super::proration::ProrationResult;
use super::rounding::round_currency;

/// Resolves the final amount for one component allocation.
///
/// | calculation type | formula |
/// |---|---|
/// | fixed | allocated amount, unchanged |
/// | percentage of base | allocated amount (pre-computed absolute value), prorated when attendance sensitive |
/// | attendance prorated | allocated amount x ratio |
/// | per day | allocated amount (daily rate) x paid days |
///
/// The result is rounded to 2 decimal places, half away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_proration, resolve_allocation};
/// use payroll_engine::models::{CalculationType, ComponentKind, SalaryComponent, StatutoryType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let component = SalaryComponent {
///     id: uuid::Uuid::new_v4(),
///     code: "CONVEYANCE".to_string(),
///     name: "Conveyance".to_string(),
///     kind: ComponentKind::Earning,
///     calculation_type: CalculationType::AttendanceProrated,
///     is_statutory: false,
///     statutory_type: StatutoryType::None,
///     default_amount: Decimal::ZERO,
///     default_percentage: Decimal::ZERO,
///     attendance_sensitive: true,
/// };
/// let proration = calculate_proration(28, Decimal::from_str("7").unwrap());
/// let amount = resolve_allocation(&component, Decimal::from_str("1600").unwrap(), &proration);
/// assert_eq!(amount, Decimal::from_str("1200.00").unwrap());
/// ```
pub fn resolve_allocation(
    component: &SalaryComponent,
    allocated_amount: Decimal,
    proration: &ProrationResult,
) -> Decimal {
    let raw = match component.calculation_type {
        CalculationType::Fixed => allocated_amount,
        CalculationType::PercentageOfBase => {
            if component.attendance_sensitive {
                allocated_amount * proration.ratio
            } else {
                allocated_amount
            }
        }
        CalculationType::AttendanceProrated => allocated_amount * proration.ratio,
        CalculationType::PerDay => allocated_amount * proration.paid_days,
    };
    round_currency(raw)
}

/// Prorates the base salary by the attendance ratio.
///
/// The base is a distinguished field, not a component, and is always
/// attendance sensitive.
pub fn prorate_base(base_amount: Decimal, proration: &ProrationResult) -> Decimal {
    round_currency(base_amount * proration.ratio)
}

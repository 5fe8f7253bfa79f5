//! Loan amortization arithmetic.
//!
//! Pure functions behind schedule generation: total payable under simple
//! interest, the per-installment amount, and the month sequence a schedule
//! occupies. The stateful guards (loan status, existing schedule) live in
//! [`crate::engine`].

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::LoanType;

use super::rounding::round_currency;

/// Principal plus simple interest over the tenure.
///
/// `principal + principal x rate/100 x tenure_months/12`, rounded to 2
/// decimal places. Computed once at loan creation and stable thereafter.
pub fn total_payable(
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenure_months: u32,
) -> Decimal {
    let years = Decimal::from(tenure_months) / Decimal::from(12);
    let interest = principal * annual_rate_percent / Decimal::ONE_HUNDRED * years;
    round_currency(principal + interest)
}

/// The uniform installment amount: `total_payable / tenure_months`,
/// rounded to 2 decimal places. A zero tenure yields zero.
pub fn emi_amount(total_payable: Decimal, tenure_months: u32) -> Decimal {
    if tenure_months == 0 {
        return Decimal::ZERO;
    }
    round_currency(total_payable / Decimal::from(tenure_months))
}

/// The `(month, year)` the first installment falls due.
///
/// Standard loans start recovery the month after disbursement; advances
/// start in the disbursement month itself.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::first_due_month;
/// use payroll_engine::models::LoanType;
/// use chrono::NaiveDate;
///
/// let disbursed = NaiveDate::from_ymd_opt(2026, 12, 20).unwrap();
/// assert_eq!(first_due_month(LoanType::Standard, disbursed), (1, 2027));
/// assert_eq!(first_due_month(LoanType::Advance, disbursed), (12, 2026));
/// ```
pub fn first_due_month(loan_type: LoanType, disbursed_on: NaiveDate) -> (u32, i32) {
    let month = disbursed_on.month();
    let year = disbursed_on.year();
    match loan_type {
        LoanType::Advance => (month, year),
        LoanType::Standard => {
            if month == 12 {
                (1, year + 1)
            } else {
                (month + 1, year)
            }
        }
    }
}

/// A contiguous sequence of `tenure_months` due months starting from
/// `start`, rolling over year boundaries.
pub fn schedule_months(start: (u32, i32), tenure_months: u32) -> Vec<(u32, i32)> {
    let (mut month, mut year) = start;
    let mut months = Vec::with_capacity(tenure_months as usize);
    for _ in 0..tenure_months {
        months.push((month, year));
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }
    }
    months
}

//! Loan schedule generation.

use uuid::Uuid;

use crate::calculation::{emi_amount, first_due_month, schedule_months};
use crate::error::{EngineError, EngineResult};
use crate::models::{Emi, EmiStatus, LoanStatus};
use crate::store::repository::MasterDataRepository;

/// The result of a schedule generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// A schedule of this many installments was created.
    Generated(u32),
    /// The loan already has installments; nothing was changed.
    AlreadyGenerated,
    /// The loan is not approved or disbursed; nothing was changed.
    NotEligible,
}

/// Generates the installment schedule for a loan.
///
/// Only approved or disbursed loans without an existing schedule are
/// eligible; everything else is a no-op outcome, not an error. The schedule
/// is a contiguous run of `tenure_months` installments starting in the
/// disbursement month (advances) or the month after it (standard loans).
pub(crate) fn generate(
    repo: &mut impl MasterDataRepository,
    loan_id: Uuid,
) -> EngineResult<ScheduleOutcome> {
    let mut loan = repo
        .loan(loan_id)
        .ok_or(EngineError::LoanNotFound { id: loan_id })?;

    if !matches!(loan.status, LoanStatus::Approved | LoanStatus::Disbursed) {
        return Ok(ScheduleOutcome::NotEligible);
    }
    if !loan.emis.is_empty() {
        return Ok(ScheduleOutcome::AlreadyGenerated);
    }

    let amount = emi_amount(loan.total_payable, loan.tenure_months);
    let start = first_due_month(loan.loan_type, loan.disbursed_on);
    for (month, year) in schedule_months(start, loan.tenure_months) {
        loan.emis.push(Emi {
            id: Uuid::new_v4(),
            month,
            year,
            amount,
            status: EmiStatus::Unpaid,
            payslip_id: None,
        });
    }

    let count = loan.emis.len() as u32;
    repo.upsert_loan(loan);
    Ok(ScheduleOutcome::Generated(count))
}

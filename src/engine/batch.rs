//! Whole-period payroll generation.
//!
//! Iterates the organization's active employees, calculating each payslip
//! in its own transaction. One employee failing rolls back only that
//! employee's work; the batch records the error and continues. Period
//! totals are recomputed by re-aggregation over all payslips after every
//! commit, never incremented in place.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollPeriod, PayslipStatus, PeriodStatus, PeriodTotals};
use crate::store::PayrollStore;
use crate::store::repository::{MasterDataRepository, PayslipRepository};

use super::{CalculationOutcome, assembly, period_status_name};

/// One employee's failure inside a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodRunError {
    /// The employee whose calculation failed.
    pub employee_id: Uuid,
    /// The error message.
    pub message: String,
}

/// The result of generating payroll for a whole period.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodRunSummary {
    /// The period that was processed.
    pub period_id: Uuid,
    /// Employees whose payslips were calculated.
    pub processed: u32,
    /// Employees skipped (no current salary assignment).
    pub skipped: u32,
    /// Employees whose calculation failed and was rolled back.
    pub errors: Vec<PeriodRunError>,
    /// Aggregate totals over the period's payslips.
    pub totals: PeriodTotals,
}

/// Re-aggregates a period's totals from its non-cancelled payslips.
pub(crate) fn recompute_period_totals<R>(repo: &mut R, period_id: Uuid) -> EngineResult<()>
where
    R: PayslipRepository + MasterDataRepository,
{
    let mut totals = PeriodTotals::default();
    for payslip in repo.payslips_in_period(period_id) {
        if payslip.status == PayslipStatus::Cancelled {
            continue;
        }
        totals.gross_earnings += payslip.gross_earnings;
        totals.total_deductions += payslip.total_deductions;
        totals.net_salary += payslip.net_salary;
        totals.payslip_count += 1;
    }

    let mut period = repo
        .period(period_id)
        .ok_or(EngineError::PeriodNotFound { id: period_id })?;
    period.totals = totals;
    repo.upsert_period(period);
    Ok(())
}

/// Runs payroll for every active employee of an organization.
pub(crate) fn generate_period(
    store: &PayrollStore,
    organization_id: Uuid,
    month: u32,
    year: i32,
) -> EngineResult<PeriodRunSummary> {
    let period = store.transaction(|tx| {
        let mut period = match tx.period_for(organization_id, month, year) {
            Some(period) => period,
            None => PayrollPeriod::new(organization_id, month, year)?,
        };
        if matches!(period.status, PeriodStatus::Paid | PeriodStatus::Cancelled) {
            return Err(EngineError::InvalidTransition {
                entity: "period".to_string(),
                from: period_status_name(period.status).to_string(),
                to: "processing".to_string(),
            });
        }
        period.status = PeriodStatus::Processing;
        tx.upsert_period(period.clone());
        Ok(period)
    })?;

    let employees = store.read(|ledger| ledger.active_employees(organization_id));
    info!(
        organization_id = %organization_id,
        month,
        year,
        employees = employees.len(),
        "period generation started"
    );

    let mut summary = PeriodRunSummary {
        period_id: period.id,
        processed: 0,
        skipped: 0,
        errors: Vec::new(),
        totals: PeriodTotals::default(),
    };

    for employee in &employees {
        let result = store.transaction(|tx| {
            let outcome = assembly::calculate(tx, employee.id, period.id)?;
            recompute_period_totals(tx, period.id)?;
            Ok(outcome)
        });
        match result {
            Ok(CalculationOutcome::Calculated(_)) => summary.processed += 1,
            Ok(CalculationOutcome::Skipped(reason)) => {
                summary.skipped += 1;
                warn!(employee_id = %employee.id, %reason, "employee skipped");
            }
            Err(error) => {
                warn!(
                    employee_id = %employee.id,
                    error = %error,
                    "employee payroll failed; batch continues"
                );
                summary.errors.push(PeriodRunError {
                    employee_id: employee.id,
                    message: error.to_string(),
                });
            }
        }
    }

    summary.totals = store.transaction(|tx| {
        let mut period = tx
            .period(period.id)
            .ok_or(EngineError::PeriodNotFound { id: period.id })?;
        period.status = PeriodStatus::Completed;
        let totals = period.totals.clone();
        tx.upsert_period(period);
        Ok(totals)
    })?;

    info!(
        period_id = %summary.period_id,
        processed = summary.processed,
        skipped = summary.skipped,
        errors = summary.errors.len(),
        net_salary = %summary.totals.net_salary,
        "period generation completed"
    );
    Ok(summary)
}

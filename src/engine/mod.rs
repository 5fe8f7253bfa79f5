//! Payslip assembly and payroll orchestration.
//!
//! [`PayrollEngine`] is the outward surface of the crate: single-payslip
//! recomputation, whole-period batch generation, loan schedule generation
//! and the payslip approval workflow. Every operation runs inside one store
//! transaction, so a failure rolls the touched payslip, its line items and
//! any claimed EMIs or ad-hoc payments back together.

mod adhoc;
mod assembly;
mod batch;
mod schedule;

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Payslip, PayslipStatus, PeriodStatus};
use crate::store::PayrollStore;
use crate::store::repository::{
    AdhocRepository, EmiRepository, PayslipRepository,
};

pub use adhoc::ComponentMatch;
pub use batch::{PeriodRunError, PeriodRunSummary};
pub use schedule::ScheduleOutcome;

/// Why a payslip calculation was skipped rather than performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The employee has no current salary assignment.
    MissingAssignment,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingAssignment => {
                write!(f, "employee has no current salary assignment")
            }
        }
    }
}

/// The result of a payslip calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationOutcome {
    /// The payslip was computed and stored.
    Calculated(Payslip),
    /// Nothing was computed; the payslip keeps its default values.
    Skipped(SkipReason),
}

/// The payroll computation engine.
pub struct PayrollEngine {
    store: Arc<PayrollStore>,
}

impl PayrollEngine {
    /// Creates an engine over a seeded store.
    pub fn new(store: Arc<PayrollStore>) -> Self {
        Self { store }
    }

    /// A handle to the underlying store.
    pub fn store(&self) -> Arc<PayrollStore> {
        Arc::clone(&self.store)
    }

    /// Recomputes one employee's payslip for one period.
    ///
    /// Idempotent: running it twice in a row yields identical totals and
    /// the same set of generated line items. Manually entered line items
    /// survive untouched.
    pub fn calculate_payslip(
        &self,
        employee_id: Uuid,
        period_id: Uuid,
    ) -> EngineResult<CalculationOutcome> {
        let outcome = self.store.transaction(|tx| {
            let outcome = assembly::calculate(tx, employee_id, period_id)?;
            batch::recompute_period_totals(tx, period_id)?;
            Ok(outcome)
        })?;

        match &outcome {
            CalculationOutcome::Calculated(payslip) => info!(
                employee_id = %employee_id,
                period_id = %period_id,
                net_salary = %payslip.net_salary,
                "payslip calculated"
            ),
            CalculationOutcome::Skipped(reason) => warn!(
                employee_id = %employee_id,
                period_id = %period_id,
                %reason,
                "payslip calculation skipped"
            ),
        }
        Ok(outcome)
    }

    /// Runs payroll for every active employee of an organization in the
    /// given month. Per-employee failures are recorded in the summary and
    /// do not abort the rest of the batch.
    pub fn generate_period(
        &self,
        organization_id: Uuid,
        month: u32,
        year: i32,
    ) -> EngineResult<PeriodRunSummary> {
        batch::generate_period(&self.store, organization_id, month, year)
    }

    /// Generates the EMI schedule for a loan. A no-op outcome (not an
    /// error) is returned for loans that are not approved or disbursed,
    /// or that already have a schedule.
    pub fn generate_loan_schedule(&self, loan_id: Uuid) -> EngineResult<ScheduleOutcome> {
        self.store.transaction(|tx| schedule::generate(tx, loan_id))
    }

    /// Approves a generated payslip, settling its linked EMIs (marking
    /// them paid and reducing loan balances) and flipping its linked
    /// ad-hoc payments to processed.
    pub fn approve_payslip(&self, payslip_id: Uuid) -> EngineResult<Payslip> {
        self.store.transaction(|tx| {
            let mut payslip = tx
                .payslip(payslip_id)
                .ok_or(EngineError::PayslipNotFound { id: payslip_id })?;
            if payslip.status != PayslipStatus::Generated {
                return Err(invalid_payslip_transition(payslip.status, "approved"));
            }
            payslip.status = PayslipStatus::Approved;
            tx.settle_emis(payslip_id);
            tx.settle_payments(payslip_id);
            tx.upsert_payslip(payslip.clone());
            Ok(payslip)
        })
    }

    /// Marks an approved payslip as paid.
    pub fn mark_payslip_paid(&self, payslip_id: Uuid) -> EngineResult<Payslip> {
        self.store.transaction(|tx| {
            let mut payslip = tx
                .payslip(payslip_id)
                .ok_or(EngineError::PayslipNotFound { id: payslip_id })?;
            if payslip.status != PayslipStatus::Approved {
                return Err(invalid_payslip_transition(payslip.status, "paid"));
            }
            payslip.status = PayslipStatus::Paid;
            tx.upsert_payslip(payslip.clone());
            Ok(payslip)
        })
    }

    /// Cancels a generated payslip, releasing its linked EMIs and ad-hoc
    /// payments so another payslip may claim them, and removing it from
    /// the period totals.
    pub fn cancel_payslip(&self, payslip_id: Uuid) -> EngineResult<Payslip> {
        self.store.transaction(|tx| {
            let mut payslip = tx
                .payslip(payslip_id)
                .ok_or(EngineError::PayslipNotFound { id: payslip_id })?;
            if payslip.status != PayslipStatus::Generated {
                return Err(invalid_payslip_transition(payslip.status, "cancelled"));
            }
            payslip.status = PayslipStatus::Cancelled;
            tx.release_emis(payslip_id);
            tx.release_payments(payslip_id);
            tx.upsert_payslip(payslip.clone());
            batch::recompute_period_totals(tx, payslip.period_id)?;
            Ok(payslip)
        })
    }
}

pub(crate) fn payslip_status_name(status: PayslipStatus) -> &'static str {
    match status {
        PayslipStatus::Generated => "generated",
        PayslipStatus::Approved => "approved",
        PayslipStatus::Paid => "paid",
        PayslipStatus::Cancelled => "cancelled",
    }
}

pub(crate) fn period_status_name(status: PeriodStatus) -> &'static str {
    match status {
        PeriodStatus::Draft => "draft",
        PeriodStatus::Processing => "processing",
        PeriodStatus::Completed => "completed",
        PeriodStatus::Paid => "paid",
        PeriodStatus::Cancelled => "cancelled",
    }
}

fn invalid_payslip_transition(from: PayslipStatus, to: &str) -> EngineError {
    EngineError::InvalidTransition {
        entity: "payslip".to_string(),
        from: payslip_status_name(from).to_string(),
        to: to.to_string(),
    }
}

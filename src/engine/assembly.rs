//! Payslip assembly.
//!
//! `calculate` is the single entry point that turns attendance, the salary
//! assignment, statutory settings, due EMIs and pending ad-hoc payments
//! into a finalized payslip. The steps run in a fixed order and the whole
//! function executes inside one store transaction:
//!
//! 1. proration from attendance
//! 2. clear generated line items, detach EMIs and ad-hoc payments
//! 3. resolve base salary, assignment components and overtime
//! 4. statutory deductions
//! 5. attach due EMIs
//! 6. merge ad-hoc payments
//! 7. recompute totals and rollups

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::calculation::{
    ProrationResult, calculate_proration, health_insurance_contribution, overtime_pay,
    prorate_base, provident_fund_contribution, resolve_allocation, round_currency,
};
use crate::config::OvertimeRule;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceSummary, ComponentKind, LoanType, Payslip, PayslipStatus, StatutoryType,
};
use crate::store::repository::{EmiClaim, PayrollRepository};

use super::adhoc::{self, MergeOutcome};
use super::{CalculationOutcome, SkipReason, payslip_status_name};

/// Computes one employee's payslip for one period.
///
/// A missing current salary assignment is a skip, not an error, so a batch
/// over many employees keeps going. Recomputing a payslip that has left the
/// `generated` state is rejected: approval settles EMIs and ad-hoc
/// payments, and rebuilding on top of that would lose them.
pub(crate) fn calculate(
    repo: &mut impl PayrollRepository,
    employee_id: Uuid,
    period_id: Uuid,
) -> EngineResult<CalculationOutcome> {
    let employee = repo
        .employee(employee_id)
        .ok_or(EngineError::EmployeeNotFound { id: employee_id })?;
    let period = repo
        .period(period_id)
        .ok_or(EngineError::PeriodNotFound { id: period_id })?;

    let mut payslip = repo
        .payslip_for(employee_id, period_id)
        .unwrap_or_else(|| Payslip::new(employee_id, period_id));
    if payslip.status != PayslipStatus::Generated {
        return Err(EngineError::InvalidTransition {
            entity: "payslip".to_string(),
            from: payslip_status_name(payslip.status).to_string(),
            to: "generated".to_string(),
        });
    }

    let Some(assignment) = repo.current_assignment(employee_id) else {
        repo.upsert_payslip(payslip);
        return Ok(CalculationOutcome::Skipped(SkipReason::MissingAssignment));
    };

    // 1. proration
    let attendance = repo
        .attendance(employee_id, period_id)
        .unwrap_or_else(|| AttendanceSummary::full(period.working_days));
    let loss_of_pay = attendance.loss_of_pay_days();
    let proration = calculate_proration(attendance.working_days, loss_of_pay);

    payslip.working_days = attendance.working_days;
    payslip.present_days = attendance.present_days;
    payslip.leave_days = attendance.leave_days;
    payslip.loss_of_pay_days = loss_of_pay;
    payslip.overtime_hours = attendance.overtime_hours;

    // 2. idempotent reset
    payslip.clear_generated_items();
    repo.release_emis(payslip.id);
    repo.release_payments(payslip.id);
    payslip.advance_recovery = Decimal::ZERO;
    payslip.overtime_amount = Decimal::ZERO;

    let settings = repo.statutory_settings(employee.organization_id);

    // 3. base salary, assignment components, overtime
    payslip.base_pay = prorate_base(assignment.base_amount, &proration);
    let full = ProrationResult::full(attendance.working_days);
    let mut full_attendance_earnings = prorate_base(assignment.base_amount, &full);
    let mut actual_structural_earnings = payslip.base_pay;

    for allocation in &assignment.allocations {
        let component = repo.component_by_id(allocation.component_id).ok_or_else(|| {
            EngineError::CalculationError {
                message: format!(
                    "assignment {} references unknown component {}",
                    assignment.id, allocation.component_id
                ),
            }
        })?;
        let amount = resolve_allocation(&component, allocation.amount, &proration);
        let full_amount = resolve_allocation(&component, allocation.amount, &full);

        if amount > Decimal::ZERO {
            if payslip.apply_generated_amount(&component, amount) {
                if component.is_earning() {
                    full_attendance_earnings += full_amount;
                    actual_structural_earnings += amount;
                }
            } else {
                warn!(
                    component = %component.code,
                    "manual line item overrides the generated amount"
                );
            }
        } else if component.is_earning() {
            // resolved to zero (degenerate period or zero allocation); it
            // still counts toward the pay lost to absence, unless a manual
            // entry owns the component
            let manually_overridden = payslip
                .line_item(component.id)
                .is_some_and(|item| item.is_manual);
            if !manually_overridden {
                full_attendance_earnings += full_amount;
            }
        }
    }

    let overtime_rule = settings
        .as_ref()
        .map(|s| s.overtime.clone())
        .unwrap_or_else(OvertimeRule::default);
    let overtime_amount = overtime_pay(
        assignment.base_amount,
        attendance.working_days,
        attendance.overtime_hours,
        &overtime_rule,
    );
    if overtime_amount > Decimal::ZERO {
        let component = repo.ensure_component(
            "OVERTIME",
            "Overtime",
            ComponentKind::Earning,
            StatutoryType::None,
        );
        if payslip.apply_generated_amount(&component, overtime_amount) {
            payslip.overtime_amount = overtime_amount;
        }
    }

    // 4. statutory deductions
    if let Some(settings) = &settings {
        let gross_so_far = payslip.base_pay + earning_items_total(&payslip);

        if !payslip.has_statutory_item(StatutoryType::ProvidentFund) {
            if let Some(amount) =
                provident_fund_contribution(&settings.provident_fund, payslip.base_pay)
            {
                let component = repo.ensure_component(
                    "PF",
                    "Provident Fund",
                    ComponentKind::Deduction,
                    StatutoryType::ProvidentFund,
                );
                payslip.apply_generated_amount(&component, amount);
            }
        }

        if !payslip.has_statutory_item(StatutoryType::HealthInsurance) {
            if let Some(amount) =
                health_insurance_contribution(&settings.health_insurance, gross_so_far)
            {
                let component = repo.ensure_component(
                    "ESI",
                    "Health Insurance",
                    ComponentKind::Deduction,
                    StatutoryType::HealthInsurance,
                );
                payslip.apply_generated_amount(&component, amount);
            }
        }

        if !settings.auto_income_tax {
            payslip
                .line_items
                .retain(|item| item.is_manual || item.statutory_type != StatutoryType::IncomeTax);
        }
    }

    // 5. due EMIs
    attach_emis(repo, &mut payslip, period.month, period.year);

    // 6. ad-hoc payments
    for payment in repo.claimable_payments(employee_id, period_id) {
        match adhoc::merge_payment(repo, &mut payslip, &payment) {
            MergeOutcome::Merged => repo.claim_payment(payment.id, payslip.id),
            MergeOutcome::AllSlotsManual | MergeOutcome::NoTarget => {}
        }
    }

    // 7. totals
    let mut earnings = payslip.base_pay;
    let mut deductions = Decimal::ZERO;
    let mut statutory = Decimal::ZERO;
    for item in &payslip.line_items {
        match item.kind {
            ComponentKind::Earning => earnings += item.amount,
            ComponentKind::Deduction => {
                deductions += item.amount;
                if item.statutory_type != StatutoryType::None {
                    statutory += item.amount;
                }
            }
        }
    }
    payslip.gross_earnings = round_currency(earnings);
    payslip.total_deductions = round_currency(deductions);
    payslip.net_salary = payslip.gross_earnings - payslip.total_deductions;
    payslip.statutory_deductions = round_currency(statutory);
    payslip.loss_of_pay_deduction =
        round_currency((full_attendance_earnings - actual_structural_earnings).max(Decimal::ZERO));

    repo.upsert_payslip(payslip.clone());
    Ok(CalculationOutcome::Calculated(payslip))
}

/// Attaches every claimable EMI for the period, one aggregated deduction
/// line item per recovery head.
fn attach_emis(repo: &mut impl PayrollRepository, payslip: &mut Payslip, month: u32, year: i32) {
    let claims = repo.claimable_emis(payslip.employee_id, month, year);
    if claims.is_empty() {
        return;
    }

    let mut groups: BTreeMap<&'static str, Vec<EmiClaim>> = BTreeMap::new();
    for claim in claims {
        let code = match claim.loan_type {
            LoanType::Advance => "SALARY_ADVANCE",
            LoanType::Standard => "LOAN_EMI",
        };
        groups.entry(code).or_default().push(claim);
    }

    for (code, claims) in groups {
        let total: Decimal = claims.iter().map(|c| c.amount).sum();
        if total <= Decimal::ZERO {
            continue;
        }
        let name = match code {
            "SALARY_ADVANCE" => "Salary Advance Recovery",
            _ => "Loan EMI",
        };
        let component =
            repo.ensure_component(code, name, ComponentKind::Deduction, StatutoryType::None);
        if payslip.apply_generated_amount(&component, total) {
            for claim in &claims {
                repo.claim_emi(claim.loan_id, claim.emi_id, payslip.id);
            }
            if code == "SALARY_ADVANCE" {
                payslip.advance_recovery += total;
            }
        } else {
            warn!(
                component = code,
                "manual line item blocks EMI recovery; installments left unclaimed"
            );
        }
    }
}

fn earning_items_total(payslip: &Payslip) -> Decimal {
    payslip
        .line_items
        .iter()
        .filter(|item| item.kind == ComponentKind::Earning)
        .map(|item| item.amount)
        .sum()
}

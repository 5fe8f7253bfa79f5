//! Typed repository interfaces over the ledger.
//!
//! Each trait exposes exactly the query shapes the assembly steps need, so
//! behavior is deterministic and testable instead of leaning on ad-hoc
//! filtered scans at call sites. [`Ledger`] implements them all; the
//! assembly code is generic over [`PayrollRepository`], the combined seam.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::StatutorySettings;
use crate::models::{
    AdhocPayment, AdhocStatus, AttendanceSummary, CalculationType, ComponentKind, Employee,
    EmiStatus, Loan, LoanType, PayrollPeriod, Payslip, PayslipStatus, SalaryAssignment,
    SalaryComponent, StatutoryType,
};

use super::Ledger;

/// One unpaid, unlinked installment due in a period, ready to be claimed.
#[derive(Debug, Clone, PartialEq)]
pub struct EmiClaim {
    /// The loan the installment belongs to.
    pub loan_id: Uuid,
    /// The installment itself.
    pub emi_id: Uuid,
    /// Loan type, deciding the recovery component code.
    pub loan_type: LoanType,
    /// Installment amount.
    pub amount: Decimal,
}

/// Salary assignment queries.
pub trait AssignmentRepository {
    /// The employee's current salary assignment, if any.
    fn current_assignment(&self, employee_id: Uuid) -> Option<SalaryAssignment>;

    /// Stores `assignment` as the employee's current revision, demoting any
    /// prior current revision in the same operation.
    fn promote_assignment(&mut self, assignment: SalaryAssignment) -> Uuid;
}

/// Salary component catalog queries.
pub trait ComponentRepository {
    /// Component by id.
    fn component_by_id(&self, id: Uuid) -> Option<SalaryComponent>;

    /// Component by its stable code.
    fn component_by_code(&self, code: &str) -> Option<SalaryComponent>;

    /// The fallback earning component for ad-hoc payments without a target:
    /// deterministically the earning component with the smallest code.
    fn default_earning_component(&self) -> Option<SalaryComponent>;

    /// Finds the component with `code`, creating a fixed-amount component
    /// of the given kind when absent. Used for derived heads such as
    /// `LOAN_EMI`, `SALARY_ADVANCE`, `OVERTIME` and statutory components.
    fn ensure_component(
        &mut self,
        code: &str,
        name: &str,
        kind: ComponentKind,
        statutory_type: StatutoryType,
    ) -> SalaryComponent;
}

/// Installment recovery queries.
pub trait EmiRepository {
    /// All unpaid installments of the employee's loans due in `(month,
    /// year)` and not yet linked to any payslip.
    fn claimable_emis(&self, employee_id: Uuid, month: u32, year: i32) -> Vec<EmiClaim>;

    /// Detaches every unpaid installment currently linked to `payslip_id`.
    fn release_emis(&mut self, payslip_id: Uuid);

    /// Links one installment to the payslip consuming it.
    fn claim_emi(&mut self, loan_id: Uuid, emi_id: Uuid, payslip_id: Uuid);

    /// Marks the installments linked to `payslip_id` as paid and settles
    /// their amounts against the loan balances.
    fn settle_emis(&mut self, payslip_id: Uuid);
}

/// Ad-hoc payment queries.
pub trait AdhocRepository {
    /// Pending payments for the employee pinned to `period_id` or unpinned,
    /// and not linked to any payslip.
    fn claimable_payments(&self, employee_id: Uuid, period_id: Uuid) -> Vec<AdhocPayment>;

    /// Detaches every still-pending payment linked to `payslip_id`.
    fn release_payments(&mut self, payslip_id: Uuid);

    /// Links one payment to the payslip consuming it.
    fn claim_payment(&mut self, payment_id: Uuid, payslip_id: Uuid);

    /// Marks the payments linked to `payslip_id` as processed.
    fn settle_payments(&mut self, payslip_id: Uuid);
}

/// The attendance source collaborator.
pub trait AttendanceSource {
    /// The employee's attendance for a period, if a record exists.
    fn attendance(&self, employee_id: Uuid, period_id: Uuid) -> Option<AttendanceSummary>;
}

/// The organization settings collaborator.
pub trait SettingsRepository {
    /// Statutory settings for an organization; `None` means the statutory
    /// engine is disabled.
    fn statutory_settings(&self, organization_id: Uuid) -> Option<StatutorySettings>;
}

/// Payslip storage.
pub trait PayslipRepository {
    /// Payslip by id.
    fn payslip(&self, id: Uuid) -> Option<Payslip>;

    /// The unique non-cancelled payslip for `(employee, period)`, if
    /// created. Cancelled payslips stay on record but no longer occupy the
    /// slot, so a replacement may be generated and claim the EMIs and
    /// payments they released.
    fn payslip_for(&self, employee_id: Uuid, period_id: Uuid) -> Option<Payslip>;

    /// All payslips belonging to a period.
    fn payslips_in_period(&self, period_id: Uuid) -> Vec<Payslip>;

    /// Inserts or replaces a payslip.
    fn upsert_payslip(&mut self, payslip: Payslip);
}

/// Master data owned by the surrounding system.
pub trait MasterDataRepository {
    /// Employee by id.
    fn employee(&self, id: Uuid) -> Option<Employee>;

    /// Active employees of an organization.
    fn active_employees(&self, organization_id: Uuid) -> Vec<Employee>;

    /// Period by id.
    fn period(&self, id: Uuid) -> Option<PayrollPeriod>;

    /// The unique period for `(organization, month, year)`, if created.
    fn period_for(&self, organization_id: Uuid, month: u32, year: i32) -> Option<PayrollPeriod>;

    /// Inserts or replaces a period.
    fn upsert_period(&mut self, period: PayrollPeriod);

    /// Loan by id.
    fn loan(&self, id: Uuid) -> Option<Loan>;

    /// Inserts or replaces a loan.
    fn upsert_loan(&mut self, loan: Loan);
}

/// The combined repository seam the assembly steps are generic over.
pub trait PayrollRepository:
    AssignmentRepository
    + ComponentRepository
    + EmiRepository
    + AdhocRepository
    + AttendanceSource
    + SettingsRepository
    + PayslipRepository
    + MasterDataRepository
{
}

impl<T> PayrollRepository for T where
    T: AssignmentRepository
        + ComponentRepository
        + EmiRepository
        + AdhocRepository
        + AttendanceSource
        + SettingsRepository
        + PayslipRepository
        + MasterDataRepository
{
}

impl AssignmentRepository for Ledger {
    fn current_assignment(&self, employee_id: Uuid) -> Option<SalaryAssignment> {
        self.assignments
            .values()
            .find(|a| a.employee_id == employee_id && a.is_current)
            .cloned()
    }

    fn promote_assignment(&mut self, mut assignment: SalaryAssignment) -> Uuid {
        for existing in self.assignments.values_mut() {
            if existing.employee_id == assignment.employee_id {
                existing.is_current = false;
            }
        }
        assignment.is_current = true;
        let id = assignment.id;
        self.assignments.insert(id, assignment);
        id
    }
}

impl ComponentRepository for Ledger {
    fn component_by_id(&self, id: Uuid) -> Option<SalaryComponent> {
        self.components.get(&id).cloned()
    }

    fn component_by_code(&self, code: &str) -> Option<SalaryComponent> {
        self.components.values().find(|c| c.code == code).cloned()
    }

    fn default_earning_component(&self) -> Option<SalaryComponent> {
        self.components
            .values()
            .filter(|c| c.is_earning())
            .min_by(|a, b| a.code.cmp(&b.code))
            .cloned()
    }

    fn ensure_component(
        &mut self,
        code: &str,
        name: &str,
        kind: ComponentKind,
        statutory_type: StatutoryType,
    ) -> SalaryComponent {
        if let Some(existing) = self.component_by_code(code) {
            return existing;
        }
        let component = SalaryComponent {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: name.to_string(),
            kind,
            calculation_type: CalculationType::Fixed,
            is_statutory: statutory_type != StatutoryType::None,
            statutory_type,
            default_amount: Decimal::ZERO,
            default_percentage: Decimal::ZERO,
            attendance_sensitive: false,
        };
        self.components.insert(component.id, component.clone());
        component
    }
}

impl EmiRepository for Ledger {
    fn claimable_emis(&self, employee_id: Uuid, month: u32, year: i32) -> Vec<EmiClaim> {
        let mut claims: Vec<EmiClaim> = self
            .loans
            .values()
            .filter(|loan| loan.employee_id == employee_id)
            .flat_map(|loan| {
                loan.emis
                    .iter()
                    .filter(|emi| {
                        emi.status == EmiStatus::Unpaid
                            && emi.payslip_id.is_none()
                            && emi.month == month
                            && emi.year == year
                    })
                    .map(|emi| EmiClaim {
                        loan_id: loan.id,
                        emi_id: emi.id,
                        loan_type: loan.loan_type,
                        amount: emi.amount,
                    })
            })
            .collect();
        claims.sort_by_key(|claim| (claim.loan_id, claim.emi_id));
        claims
    }

    fn release_emis(&mut self, payslip_id: Uuid) {
        for loan in self.loans.values_mut() {
            for emi in &mut loan.emis {
                if emi.payslip_id == Some(payslip_id) && emi.status == EmiStatus::Unpaid {
                    emi.payslip_id = None;
                }
            }
        }
    }

    fn claim_emi(&mut self, loan_id: Uuid, emi_id: Uuid, payslip_id: Uuid) {
        if let Some(loan) = self.loans.get_mut(&loan_id) {
            for emi in &mut loan.emis {
                if emi.id == emi_id && emi.status == EmiStatus::Unpaid && emi.payslip_id.is_none()
                {
                    emi.payslip_id = Some(payslip_id);
                }
            }
        }
    }

    fn settle_emis(&mut self, payslip_id: Uuid) {
        for loan in self.loans.values_mut() {
            let mut settled = Decimal::ZERO;
            for emi in &mut loan.emis {
                if emi.payslip_id == Some(payslip_id) && emi.status == EmiStatus::Unpaid {
                    emi.status = EmiStatus::Paid;
                    settled += emi.amount;
                }
            }
            if settled > Decimal::ZERO {
                loan.settle(settled);
            }
        }
    }
}

impl AdhocRepository for Ledger {
    fn claimable_payments(&self, employee_id: Uuid, period_id: Uuid) -> Vec<AdhocPayment> {
        let mut payments: Vec<AdhocPayment> = self
            .adhoc_payments
            .values()
            .filter(|payment| {
                payment.employee_id == employee_id
                    && payment.status == AdhocStatus::Pending
                    && payment.processed_in_payslip.is_none()
                    && payment
                        .payroll_period_id
                        .map(|pinned| pinned == period_id)
                        .unwrap_or(true)
            })
            .cloned()
            .collect();
        payments.sort_by_key(|payment| payment.id);
        payments
    }

    fn release_payments(&mut self, payslip_id: Uuid) {
        for payment in self.adhoc_payments.values_mut() {
            if payment.processed_in_payslip == Some(payslip_id)
                && payment.status == AdhocStatus::Pending
            {
                payment.processed_in_payslip = None;
            }
        }
    }

    fn claim_payment(&mut self, payment_id: Uuid, payslip_id: Uuid) {
        if let Some(payment) = self.adhoc_payments.get_mut(&payment_id) {
            if payment.status == AdhocStatus::Pending && payment.processed_in_payslip.is_none() {
                payment.processed_in_payslip = Some(payslip_id);
            }
        }
    }

    fn settle_payments(&mut self, payslip_id: Uuid) {
        for payment in self.adhoc_payments.values_mut() {
            if payment.processed_in_payslip == Some(payslip_id)
                && payment.status == AdhocStatus::Pending
            {
                payment.status = AdhocStatus::Processed;
            }
        }
    }
}

impl AttendanceSource for Ledger {
    fn attendance(&self, employee_id: Uuid, period_id: Uuid) -> Option<AttendanceSummary> {
        self.attendance.get(&(employee_id, period_id)).cloned()
    }
}

impl SettingsRepository for Ledger {
    fn statutory_settings(&self, organization_id: Uuid) -> Option<StatutorySettings> {
        self.settings.get(&organization_id).cloned()
    }
}

impl PayslipRepository for Ledger {
    fn payslip(&self, id: Uuid) -> Option<Payslip> {
        self.payslips.get(&id).cloned()
    }

    fn payslip_for(&self, employee_id: Uuid, period_id: Uuid) -> Option<Payslip> {
        self.payslips
            .values()
            .find(|p| {
                p.employee_id == employee_id
                    && p.period_id == period_id
                    && p.status != PayslipStatus::Cancelled
            })
            .cloned()
    }

    fn payslips_in_period(&self, period_id: Uuid) -> Vec<Payslip> {
        self.payslips
            .values()
            .filter(|p| p.period_id == period_id)
            .cloned()
            .collect()
    }

    fn upsert_payslip(&mut self, payslip: Payslip) {
        self.payslips.insert(payslip.id, payslip);
    }
}

impl MasterDataRepository for Ledger {
    fn employee(&self, id: Uuid) -> Option<Employee> {
        self.employees.get(&id).cloned()
    }

    fn active_employees(&self, organization_id: Uuid) -> Vec<Employee> {
        let mut employees: Vec<Employee> = self
            .employees
            .values()
            .filter(|e| e.organization_id == organization_id && e.is_active)
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        employees
    }

    fn period(&self, id: Uuid) -> Option<PayrollPeriod> {
        self.periods.get(&id).cloned()
    }

    fn period_for(&self, organization_id: Uuid, month: u32, year: i32) -> Option<PayrollPeriod> {
        self.periods
            .values()
            .find(|p| p.organization_id == organization_id && p.month == month && p.year == year)
            .cloned()
    }

    fn upsert_period(&mut self, period: PayrollPeriod) {
        self.periods.insert(period.id, period);
    }

    fn loan(&self, id: Uuid) -> Option<Loan> {
        self.loans.get(&id).cloned()
    }

    fn upsert_loan(&mut self, loan: Loan) {
        self.loans.insert(loan.id, loan);
    }
}

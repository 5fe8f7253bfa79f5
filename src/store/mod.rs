//! In-memory persistence for the payroll engine.
//!
//! [`Ledger`] holds every entity map and implements the typed repository
//! traits in [`repository`]. [`PayrollStore`] wraps a ledger behind a
//! `RwLock` and provides snapshot-rollback transactions: all steps of one
//! payslip calculation run against `&mut Ledger` under the write lock, and
//! an `Err` restores the pre-transaction state, so partial application is
//! never visible to readers.

pub mod repository;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use crate::config::StatutorySettings;
use crate::error::EngineResult;
use crate::models::{
    AdhocPayment, AttendanceSummary, Employee, Loan, PayrollPeriod, Payslip, SalaryAssignment,
    SalaryComponent,
};

/// All payroll entities for every organization, held in memory.
///
/// Mutation goes through [`PayrollStore::transaction`]; the seeding methods
/// here exist to build initial state before the engine runs.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub(crate) employees: HashMap<Uuid, Employee>,
    pub(crate) components: HashMap<Uuid, SalaryComponent>,
    pub(crate) assignments: HashMap<Uuid, SalaryAssignment>,
    pub(crate) periods: HashMap<Uuid, PayrollPeriod>,
    pub(crate) payslips: HashMap<Uuid, Payslip>,
    pub(crate) loans: HashMap<Uuid, Loan>,
    pub(crate) adhoc_payments: HashMap<Uuid, AdhocPayment>,
    pub(crate) attendance: HashMap<(Uuid, Uuid), AttendanceSummary>,
    pub(crate) settings: HashMap<Uuid, StatutorySettings>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee, returning its id.
    pub fn insert_employee(&mut self, employee: Employee) -> Uuid {
        let id = employee.id;
        self.employees.insert(id, employee);
        id
    }

    /// Adds a salary component, returning its id.
    pub fn insert_component(&mut self, component: SalaryComponent) -> Uuid {
        let id = component.id;
        self.components.insert(id, component);
        id
    }

    /// Adds a loan, returning its id.
    pub fn insert_loan(&mut self, loan: Loan) -> Uuid {
        let id = loan.id;
        self.loans.insert(id, loan);
        id
    }

    /// Adds an ad-hoc payment, returning its id.
    pub fn insert_adhoc_payment(&mut self, payment: AdhocPayment) -> Uuid {
        let id = payment.id;
        self.adhoc_payments.insert(id, payment);
        id
    }

    /// Records an attendance summary for an employee in a period.
    pub fn insert_attendance(
        &mut self,
        employee_id: Uuid,
        period_id: Uuid,
        summary: AttendanceSummary,
    ) {
        self.attendance.insert((employee_id, period_id), summary);
    }

    /// Sets the statutory settings for an organization.
    pub fn insert_settings(&mut self, organization_id: Uuid, settings: StatutorySettings) {
        self.settings.insert(organization_id, settings);
    }

    /// Looks up an ad-hoc payment.
    pub fn adhoc_payment(&self, id: Uuid) -> Option<&AdhocPayment> {
        self.adhoc_payments.get(&id)
    }

    /// Looks up a salary component.
    pub fn component(&self, id: Uuid) -> Option<&SalaryComponent> {
        self.components.get(&id)
    }
}

/// Thread-safe store with snapshot-rollback transactions.
#[derive(Debug, Default)]
pub struct PayrollStore {
    inner: RwLock<Ledger>,
}

impl PayrollStore {
    /// Creates a store over a seeded ledger.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: RwLock::new(ledger),
        }
    }

    /// Runs `f` against the ledger under the write lock.
    ///
    /// A snapshot is taken first; when `f` returns `Err` the ledger is
    /// restored to it, so a failed calculation leaves no partial state
    /// behind. The single write lock also serializes writers, which covers
    /// the requirement that recomputations of the same payslip never run
    /// concurrently.
    pub fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Ledger) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let snapshot = guard.clone();
        match f(&mut guard) {
            Ok(value) => Ok(value),
            Err(error) => {
                *guard = snapshot;
                Err(error)
            }
        }
    }

    /// Runs a read-only closure against the ledger.
    pub fn read<T>(&self, f: impl FnOnce(&Ledger) -> T) -> T {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

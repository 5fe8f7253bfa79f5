//! Loan and installment models.
//!
//! A [`Loan`] exclusively owns its [`Emi`] installments. `total_payable` is
//! fixed at creation using simple interest and never recomputed; repayment
//! progress is tracked through the `balance` field and per-EMI status.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{round_currency, total_payable};

/// Whether the loan is a regular loan or a salary advance.
///
/// The distinction drives the recovery start month (advances start recovery
/// in the disbursement month itself) and the deduction head the recovery is
/// booked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    /// Regular loan; first EMI falls in the month after disbursement.
    Standard,
    /// Salary advance; first EMI falls in the disbursement month.
    Advance,
}

/// Lifecycle of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Applied for, awaiting a decision.
    Requested,
    /// Approved; eligible for schedule generation.
    Approved,
    /// Amount handed over; eligible for schedule generation.
    Disbursed,
    /// Fully recovered.
    Closed,
    /// Application declined.
    Rejected,
}

/// Status of a single installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmiStatus {
    /// Due and not yet recovered.
    Unpaid,
    /// Recovered through an approved payslip.
    Paid,
    /// Deliberately left out of recovery.
    Skipped,
}

/// One scheduled installment of a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emi {
    /// Unique identifier for the installment.
    pub id: Uuid,
    /// Due month, 1..=12.
    pub month: u32,
    /// Due year.
    pub year: i32,
    /// Installment amount.
    pub amount: Decimal,
    /// Recovery status.
    pub status: EmiStatus,
    /// The payslip that consumed this installment, if any. An EMI is linked
    /// to at most one payslip, and only while unpaid.
    pub payslip_id: Option<Uuid>,
}

/// A loan or salary advance granted to an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Unique identifier for the loan.
    pub id: Uuid,
    /// The borrowing employee.
    pub employee_id: Uuid,
    /// Amount lent.
    pub principal: Decimal,
    /// Simple annual interest rate as a percentage, e.g. 12 means 12%.
    pub annual_interest_rate: Decimal,
    /// Number of monthly installments.
    pub tenure_months: u32,
    /// Standard loan or salary advance.
    pub loan_type: LoanType,
    /// Lifecycle status.
    pub status: LoanStatus,
    /// Principal plus simple interest, fixed at creation.
    pub total_payable: Decimal,
    /// Amount still to be recovered.
    pub balance: Decimal,
    /// Date the amount was (or is to be) handed over.
    pub disbursed_on: NaiveDate,
    /// Owned installment schedule.
    pub emis: Vec<Emi>,
}

impl Loan {
    /// Creates an approved loan with `total_payable` computed from simple
    /// interest over the tenure.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{Loan, LoanType};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let loan = Loan::new(
    ///     uuid::Uuid::new_v4(),
    ///     Decimal::new(12000, 0),
    ///     Decimal::ZERO,
    ///     12,
    ///     LoanType::Standard,
    ///     NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
    /// );
    /// assert_eq!(loan.total_payable, Decimal::new(12000, 0));
    /// assert_eq!(loan.balance, loan.total_payable);
    /// ```
    pub fn new(
        employee_id: Uuid,
        principal: Decimal,
        annual_interest_rate: Decimal,
        tenure_months: u32,
        loan_type: LoanType,
        disbursed_on: NaiveDate,
    ) -> Self {
        let payable = total_payable(principal, annual_interest_rate, tenure_months);
        Self {
            id: Uuid::new_v4(),
            employee_id,
            principal,
            annual_interest_rate,
            tenure_months,
            loan_type,
            status: LoanStatus::Approved,
            total_payable: payable,
            balance: payable,
            disbursed_on,
            emis: Vec::new(),
        }
    }

    /// The deduction component code recoveries against this loan are booked
    /// under.
    pub fn recovery_code(&self) -> &'static str {
        match self.loan_type {
            LoanType::Advance => "SALARY_ADVANCE",
            LoanType::Standard => "LOAN_EMI",
        }
    }

    /// Records a settled installment amount against the balance, closing
    /// the loan once nothing remains.
    pub fn settle(&mut self, amount: Decimal) {
        self.balance = round_currency((self.balance - amount).max(Decimal::ZERO));
        if self.balance == Decimal::ZERO {
            self.status = LoanStatus::Closed;
        }
    }
}

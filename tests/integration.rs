//! Integration tests for the payroll engine.
//!
//! This suite exercises the engine through its public surface:
//! - attendance proration and component resolution
//! - statutory deductions with wage ceilings
//! - loan EMI recovery and exclusivity
//! - ad-hoc payment merging without double counting
//! - idempotent recomputation and the conservation invariant
//! - batch generation with per-employee skip/error reporting
//! - the HTTP endpoints

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use payroll_engine::calculation::calculate_proration;
use payroll_engine::config::{
    HealthInsuranceRule, OvertimeRule, ProvidentFundRule, SettingsLoader, StatutorySettings,
};
use payroll_engine::engine::{CalculationOutcome, PayrollEngine, ScheduleOutcome, SkipReason};
use payroll_engine::models::{
    AdhocPayment, AdhocStatus, AttendanceSummary, CalculationType, ComponentAllocation,
    ComponentKind, Employee, EmiStatus, Loan, LoanType, PayrollPeriod, Payslip, PayslipLineItem,
    SalaryAssignment, SalaryComponent, StatutoryType,
};
use payroll_engine::store::repository::{
    AssignmentRepository, MasterDataRepository, PayslipRepository,
};
use payroll_engine::store::{Ledger, PayrollStore};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn statutory_settings() -> StatutorySettings {
    StatutorySettings {
        provident_fund: ProvidentFundRule {
            enabled: true,
            employee_rate: dec("12"),
            wage_ceiling: dec("15000"),
            restrict_base_to_ceiling: true,
        },
        health_insurance: HealthInsuranceRule {
            enabled: true,
            employee_rate: dec("0.75"),
            wage_ceiling: dec("21000"),
        },
        auto_income_tax: false,
        overtime: OvertimeRule::default(),
    }
}

fn earning(code: &str, calculation_type: CalculationType) -> SalaryComponent {
    SalaryComponent {
        id: Uuid::new_v4(),
        code: code.to_string(),
        name: code.to_string(),
        kind: ComponentKind::Earning,
        calculation_type,
        is_statutory: false,
        statutory_type: StatutoryType::None,
        default_amount: Decimal::ZERO,
        default_percentage: Decimal::ZERO,
        attendance_sensitive: true,
    }
}

/// An organization with one employee on a 50,000 base salary plus HRA
/// (20,000, percentage-derived) and conveyance (1,600, fixed), statutory
/// settings enabled, and a February 2026 period with 7 loss-of-pay days.
struct Fixture {
    engine: PayrollEngine,
    organization_id: Uuid,
    employee_id: Uuid,
    period_id: Uuid,
}

impl Fixture {
    fn new() -> Self {
        let organization_id = Uuid::new_v4();
        let mut ledger = Ledger::new();

        let hra = earning("HRA", CalculationType::PercentageOfBase);
        let conveyance = SalaryComponent {
            attendance_sensitive: false,
            ..earning("CONVEYANCE", CalculationType::Fixed)
        };
        let hra_id = ledger.insert_component(hra);
        let conveyance_id = ledger.insert_component(conveyance);

        let employee_id = ledger.insert_employee(Employee::new(organization_id, "Asha Rao"));
        ledger.promote_assignment(SalaryAssignment::new(
            employee_id,
            dec("50000"),
            vec![
                ComponentAllocation {
                    component_id: hra_id,
                    amount: dec("20000"),
                },
                ComponentAllocation {
                    component_id: conveyance_id,
                    amount: dec("1600"),
                },
            ],
            date(2026, 1, 1),
        ));
        ledger.insert_settings(organization_id, statutory_settings());

        let period = PayrollPeriod::new(organization_id, 2, 2026).unwrap();
        let period_id = period.id;
        ledger.upsert_period(period);

        let mut attendance = AttendanceSummary::full(28);
        attendance.absent_days = dec("7");
        attendance.present_days = dec("21");
        ledger.insert_attendance(employee_id, period_id, attendance);

        let engine = PayrollEngine::new(Arc::new(PayrollStore::new(ledger)));
        Self {
            engine,
            organization_id,
            employee_id,
            period_id,
        }
    }

    fn calculate(&self) -> Payslip {
        match self
            .engine
            .calculate_payslip(self.employee_id, self.period_id)
            .unwrap()
        {
            CalculationOutcome::Calculated(payslip) => payslip,
            CalculationOutcome::Skipped(reason) => panic!("unexpected skip: {}", reason),
        }
    }

    fn period_for_month(&self, month: u32, year: i32) -> Uuid {
        self.engine
            .store()
            .transaction(|tx| {
                if let Some(period) = tx.period_for(self.organization_id, month, year) {
                    return Ok(period.id);
                }
                let period = PayrollPeriod::new(self.organization_id, month, year)?;
                let id = period.id;
                tx.upsert_period(period);
                Ok(id)
            })
            .unwrap()
    }

    fn payslip(&self, payslip_id: Uuid) -> Payslip {
        self.engine
            .store()
            .read(|ledger| ledger.payslip(payslip_id))
            .unwrap()
    }

    fn loan(&self, loan_id: Uuid) -> Loan {
        self.engine
            .store()
            .read(|ledger| ledger.loan(loan_id))
            .unwrap()
    }

    fn adhoc(&self, payment_id: Uuid) -> AdhocPayment {
        self.engine
            .store()
            .read(|ledger| ledger.adhoc_payment(payment_id).cloned())
            .unwrap()
    }
}

fn non_manual_items(payslip: &Payslip) -> Vec<&PayslipLineItem> {
    payslip.line_items.iter().filter(|i| !i.is_manual).collect()
}

fn item_amount(payslip: &Payslip, code: &str) -> Option<Decimal> {
    payslip
        .line_items
        .iter()
        .find(|i| i.component_code == code)
        .map(|i| i.amount)
}

// =============================================================================
// Proration and component resolution
// =============================================================================

#[test]
fn test_prorated_payslip_with_statutory_deductions() {
    let fixture = Fixture::new();
    let payslip = fixture.calculate();

    // 7 of 28 days unpaid: ratio 0.75
    assert_eq!(payslip.loss_of_pay_days, dec("7"));
    assert_eq!(payslip.base_pay, dec("37500.00"));
    // HRA prorates, conveyance is flat
    assert_eq!(item_amount(&payslip, "HRA"), Some(dec("15000.00")));
    assert_eq!(item_amount(&payslip, "CONVEYANCE"), Some(dec("1600.00")));
    assert_eq!(payslip.gross_earnings, dec("54100.00"));

    // PF base 37,500 capped at 15,000 at 12%
    assert_eq!(item_amount(&payslip, "PF"), Some(dec("1800.00")));
    // gross above the ESI ceiling: no contribution
    assert_eq!(item_amount(&payslip, "ESI"), None);
    assert_eq!(payslip.total_deductions, dec("1800.00"));
    assert_eq!(payslip.statutory_deductions, dec("1800.00"));
    assert_eq!(payslip.net_salary, dec("52300.00"));

    // full-attendance earnings 71,600 vs actual 54,100
    assert_eq!(payslip.loss_of_pay_deduction, dec("17500.00"));
}

#[test]
fn test_missing_attendance_record_means_full_attendance() {
    let fixture = Fixture::new();
    let march = fixture.period_for_month(3, 2026);

    let outcome = fixture
        .engine
        .calculate_payslip(fixture.employee_id, march)
        .unwrap();
    let CalculationOutcome::Calculated(payslip) = outcome else {
        panic!("expected calculation");
    };

    assert_eq!(payslip.working_days, 31);
    assert_eq!(payslip.base_pay, dec("50000"));
    assert_eq!(payslip.loss_of_pay_deduction, Decimal::ZERO);
    assert_eq!(payslip.gross_earnings, dec("71600.00"));
}

#[test]
fn test_degenerate_period_yields_zero_pay_without_error() {
    let fixture = Fixture::new();
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.insert_attendance(
                fixture.employee_id,
                fixture.period_id,
                AttendanceSummary::full(0),
            );
            Ok(())
        })
        .unwrap();

    let payslip = fixture.calculate();
    assert_eq!(payslip.base_pay, Decimal::ZERO);
    // attendance-driven amounts zero out; the fixed component still pays
    assert_eq!(item_amount(&payslip, "HRA"), None);
    assert_eq!(item_amount(&payslip, "CONVEYANCE"), Some(dec("1600.00")));
    assert_eq!(payslip.gross_earnings, dec("1600.00"));
    // gross fell under the ESI ceiling: 0.75% of 1,600
    assert_eq!(item_amount(&payslip, "ESI"), Some(dec("12.00")));
    assert_eq!(payslip.net_salary, dec("1588.00"));
    assert_eq!(payslip.loss_of_pay_deduction, dec("70000.00"));
}

#[test]
fn test_shipped_settings_file_matches_fixture_rules() {
    let loader = SettingsLoader::load("./config/statutory.yaml").unwrap();
    assert_eq!(loader.into_settings(), statutory_settings());
}

#[test]
fn test_health_insurance_applies_under_ceiling() {
    let organization_id = Uuid::new_v4();
    let mut ledger = Ledger::new();
    let employee_id = ledger.insert_employee(Employee::new(organization_id, "Ravi Iyer"));
    ledger.promote_assignment(SalaryAssignment::new(
        employee_id,
        dec("20000"),
        vec![],
        date(2026, 1, 1),
    ));
    ledger.insert_settings(organization_id, statutory_settings());
    let period = PayrollPeriod::new(organization_id, 2, 2026).unwrap();
    let period_id = period.id;
    ledger.upsert_period(period);

    let engine = PayrollEngine::new(Arc::new(PayrollStore::new(ledger)));
    let CalculationOutcome::Calculated(payslip) =
        engine.calculate_payslip(employee_id, period_id).unwrap()
    else {
        panic!("expected calculation");
    };

    // PF: 15,000 cap at 12% = 1,800; ESI: 0.75% of 20,000 = 150
    assert_eq!(item_amount(&payslip, "PF"), Some(dec("1800.00")));
    assert_eq!(item_amount(&payslip, "ESI"), Some(dec("150.00")));
    assert_eq!(payslip.net_salary, dec("18050.00"));
}

#[test]
fn test_overtime_paid_from_attendance_hours() {
    let fixture = Fixture::new();
    fixture
        .engine
        .store()
        .transaction(|tx| {
            let mut attendance = AttendanceSummary::full(28);
            attendance.overtime_hours = dec("3");
            tx.insert_attendance(fixture.employee_id, fixture.period_id, attendance);
            Ok(())
        })
        .unwrap();

    let payslip = fixture.calculate();
    // 50000 / (28 * 8) per hour, doubled, for 3 hours
    assert_eq!(payslip.overtime_amount, dec("1339.29"));
    assert_eq!(item_amount(&payslip, "OVERTIME"), Some(dec("1339.29")));
    assert_eq!(payslip.gross_earnings, dec("72939.29"));
}

// =============================================================================
// Idempotence and conservation
// =============================================================================

#[test]
fn test_recomputation_is_idempotent() {
    let fixture = Fixture::new();

    let first = fixture.calculate();
    let second = fixture.calculate();

    assert_eq!(first.gross_earnings, second.gross_earnings);
    assert_eq!(first.total_deductions, second.total_deductions);
    assert_eq!(first.net_salary, second.net_salary);
    assert_eq!(first.loss_of_pay_deduction, second.loss_of_pay_deduction);
    assert_eq!(
        non_manual_items(&first).len(),
        non_manual_items(&second).len()
    );
}

#[test]
fn test_recomputation_idempotent_with_loans_and_adhocs() {
    let fixture = Fixture::new();

    let loan = Loan::new(
        fixture.employee_id,
        dec("12000"),
        Decimal::ZERO,
        12,
        LoanType::Standard,
        date(2026, 1, 15),
    );
    let loan_id = loan.id;
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.upsert_loan(loan.clone());
            tx.insert_adhoc_payment(AdhocPayment::new(
                fixture.employee_id,
                "Referral Bonus",
                dec("5000"),
            ));
            Ok(())
        })
        .unwrap();
    fixture.engine.generate_loan_schedule(loan_id).unwrap();

    let first = fixture.calculate();
    let second = fixture.calculate();
    let third = fixture.calculate();

    assert_eq!(first.net_salary, second.net_salary);
    assert_eq!(second.net_salary, third.net_salary);
    assert_eq!(item_amount(&third, "LOAN_EMI"), Some(dec("1000.00")));

    // exactly one EMI remains linked to the payslip after three runs
    let linked = fixture
        .loan(loan_id)
        .emis
        .iter()
        .filter(|e| e.payslip_id == Some(third.id))
        .count();
    assert_eq!(linked, 1);
}

#[test]
fn test_conservation_of_totals() {
    let fixture = Fixture::new();
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.insert_adhoc_payment(AdhocPayment::new(
                fixture.employee_id,
                "Spot Award",
                dec("1234.56"),
            ));
            Ok(())
        })
        .unwrap();

    let payslip = fixture.calculate();
    assert_eq!(
        payslip.net_salary,
        payslip.gross_earnings - payslip.total_deductions
    );

    let earnings: Decimal = payslip
        .line_items
        .iter()
        .filter(|i| i.kind == ComponentKind::Earning)
        .map(|i| i.amount)
        .sum();
    let deductions: Decimal = payslip
        .line_items
        .iter()
        .filter(|i| i.kind == ComponentKind::Deduction)
        .map(|i| i.amount)
        .sum();
    assert_eq!(payslip.gross_earnings, payslip.base_pay + earnings);
    assert_eq!(payslip.total_deductions, deductions);
}

#[test]
fn test_manual_line_items_survive_recomputation() {
    let fixture = Fixture::new();
    let payslip = fixture.calculate();
    let payslip_id = payslip.id;

    fixture
        .engine
        .store()
        .transaction(|tx| {
            let mut payslip = tx.payslip(payslip_id).unwrap();
            payslip.line_items.push(PayslipLineItem {
                component_id: Uuid::new_v4(),
                component_code: "SPOT_AWARD".to_string(),
                component_name: "Spot Award".to_string(),
                kind: ComponentKind::Earning,
                statutory_type: StatutoryType::None,
                amount: dec("750"),
                is_manual: true,
            });
            tx.upsert_payslip(payslip);
            Ok(())
        })
        .unwrap();

    let recomputed = fixture.calculate();
    let manual = recomputed
        .line_items
        .iter()
        .find(|i| i.component_code == "SPOT_AWARD")
        .expect("manual item dropped by recomputation");
    assert_eq!(manual.amount, dec("750"));
    // manual amount is counted into gross on top of the structure
    assert_eq!(recomputed.gross_earnings, dec("54850.00"));
}

#[test]
fn test_manual_statutory_item_suppresses_generated_contribution() {
    let fixture = Fixture::new();
    let payslip = fixture.calculate();
    let payslip_id = payslip.id;
    let pf_component_id = payslip
        .line_items
        .iter()
        .find(|i| i.component_code == "PF")
        .unwrap()
        .component_id;

    // replace the generated PF row with a manual override
    fixture
        .engine
        .store()
        .transaction(|tx| {
            let mut payslip = tx.payslip(payslip_id).unwrap();
            payslip.line_items.retain(|i| i.component_code != "PF");
            payslip.line_items.push(PayslipLineItem {
                component_id: pf_component_id,
                component_code: "PF".to_string(),
                component_name: "Provident Fund".to_string(),
                kind: ComponentKind::Deduction,
                statutory_type: StatutoryType::ProvidentFund,
                amount: dec("2100"),
                is_manual: true,
            });
            tx.upsert_payslip(payslip);
            Ok(())
        })
        .unwrap();

    let recomputed = fixture.calculate();
    assert_eq!(item_amount(&recomputed, "PF"), Some(dec("2100")));
    assert_eq!(recomputed.statutory_deductions, dec("2100.00"));
}

// =============================================================================
// Loan EMI recovery
// =============================================================================

#[test]
fn test_standard_loan_emi_recovered_from_next_month() {
    let fixture = Fixture::new();
    let loan = Loan::new(
        fixture.employee_id,
        dec("12000"),
        Decimal::ZERO,
        12,
        LoanType::Standard,
        date(2026, 1, 15),
    );
    let loan_id = loan.id;
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.upsert_loan(loan.clone());
            Ok(())
        })
        .unwrap();

    let outcome = fixture.engine.generate_loan_schedule(loan_id).unwrap();
    assert_eq!(outcome, ScheduleOutcome::Generated(12));

    // first EMI is due February, the month after disbursement
    let payslip = fixture.calculate();
    assert_eq!(item_amount(&payslip, "LOAN_EMI"), Some(dec("1000.00")));
    assert_eq!(payslip.advance_recovery, Decimal::ZERO);
    assert_eq!(payslip.total_deductions, dec("2800.00"));
}

#[test]
fn test_advance_recovery_rolls_into_advance_recovery_total() {
    let fixture = Fixture::new();
    let advance = Loan::new(
        fixture.employee_id,
        dec("6000"),
        Decimal::ZERO,
        3,
        LoanType::Advance,
        date(2026, 2, 5),
    );
    let loan_id = advance.id;
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.upsert_loan(advance.clone());
            Ok(())
        })
        .unwrap();
    fixture.engine.generate_loan_schedule(loan_id).unwrap();

    // advance recovery starts in the disbursement month itself
    let payslip = fixture.calculate();
    assert_eq!(item_amount(&payslip, "SALARY_ADVANCE"), Some(dec("2000.00")));
    assert_eq!(payslip.advance_recovery, dec("2000.00"));
}

#[test]
fn test_multiple_emis_same_month_aggregate_into_one_line_item() {
    let fixture = Fixture::new();
    let first = Loan::new(
        fixture.employee_id,
        dec("12000"),
        Decimal::ZERO,
        12,
        LoanType::Standard,
        date(2026, 1, 15),
    );
    let second = Loan::new(
        fixture.employee_id,
        dec("2400"),
        Decimal::ZERO,
        6,
        LoanType::Standard,
        date(2026, 1, 20),
    );
    let (first_id, second_id) = (first.id, second.id);
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.upsert_loan(first.clone());
            tx.upsert_loan(second.clone());
            Ok(())
        })
        .unwrap();
    fixture.engine.generate_loan_schedule(first_id).unwrap();
    fixture.engine.generate_loan_schedule(second_id).unwrap();

    let payslip = fixture.calculate();
    // 1000 + 400, aggregated under one deduction head
    assert_eq!(item_amount(&payslip, "LOAN_EMI"), Some(dec("1400.00")));
    let emi_items = payslip
        .line_items
        .iter()
        .filter(|i| i.component_code == "LOAN_EMI")
        .count();
    assert_eq!(emi_items, 1);
}

#[test]
fn test_emi_exclusivity_across_payslips() {
    let fixture = Fixture::new();
    let loan = Loan::new(
        fixture.employee_id,
        dec("12000"),
        Decimal::ZERO,
        12,
        LoanType::Standard,
        date(2026, 1, 15),
    );
    let loan_id = loan.id;
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.upsert_loan(loan.clone());
            Ok(())
        })
        .unwrap();
    fixture.engine.generate_loan_schedule(loan_id).unwrap();

    let february = fixture.calculate();
    let march_period = fixture.period_for_month(3, 2026);
    let CalculationOutcome::Calculated(march) = fixture
        .engine
        .calculate_payslip(fixture.employee_id, march_period)
        .unwrap()
    else {
        panic!("expected calculation");
    };

    let loan = fixture.loan(loan_id);
    let feb_emi = loan.emis.iter().find(|e| e.month == 2).unwrap();
    let mar_emi = loan.emis.iter().find(|e| e.month == 3).unwrap();
    assert_eq!(feb_emi.payslip_id, Some(february.id));
    assert_eq!(mar_emi.payslip_id, Some(march.id));

    // no installment is linked to more than one payslip
    for emi in &loan.emis {
        assert!(emi.payslip_id == None || emi.payslip_id == Some(february.id) || emi.payslip_id == Some(march.id));
    }
    assert_eq!(
        loan.emis.iter().filter(|e| e.payslip_id.is_some()).count(),
        2
    );
}

#[test]
fn test_cancelled_payslip_releases_emis_for_a_replacement() {
    let fixture = Fixture::new();
    let loan = Loan::new(
        fixture.employee_id,
        dec("12000"),
        Decimal::ZERO,
        12,
        LoanType::Standard,
        date(2026, 1, 15),
    );
    let loan_id = loan.id;
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.upsert_loan(loan.clone());
            Ok(())
        })
        .unwrap();
    fixture.engine.generate_loan_schedule(loan_id).unwrap();

    let original = fixture.calculate();
    fixture.engine.cancel_payslip(original.id).unwrap();

    // the cancelled payslip released its installment
    let loan_after_cancel = fixture.loan(loan_id);
    assert!(
        loan_after_cancel
            .emis
            .iter()
            .all(|e| e.payslip_id.is_none())
    );

    // a replacement payslip claims it
    let replacement = fixture.calculate();
    assert_ne!(replacement.id, original.id);
    let loan = fixture.loan(loan_id);
    let feb_emi = loan.emis.iter().find(|e| e.month == 2).unwrap();
    assert_eq!(feb_emi.payslip_id, Some(replacement.id));
}

#[test]
fn test_approval_settles_emis_and_reduces_balance() {
    let fixture = Fixture::new();
    let loan = Loan::new(
        fixture.employee_id,
        dec("12000"),
        Decimal::ZERO,
        12,
        LoanType::Standard,
        date(2026, 1, 15),
    );
    let loan_id = loan.id;
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.upsert_loan(loan.clone());
            Ok(())
        })
        .unwrap();
    fixture.engine.generate_loan_schedule(loan_id).unwrap();

    let payslip = fixture.calculate();
    fixture.engine.approve_payslip(payslip.id).unwrap();

    let loan = fixture.loan(loan_id);
    let feb_emi = loan.emis.iter().find(|e| e.month == 2).unwrap();
    assert_eq!(feb_emi.status, EmiStatus::Paid);
    assert_eq!(loan.balance, dec("11000.00"));

    // an approved payslip cannot be recomputed
    let result = fixture
        .engine
        .calculate_payslip(fixture.employee_id, fixture.period_id);
    assert!(result.is_err());
}

// =============================================================================
// Ad-hoc payments
// =============================================================================

#[test]
fn test_adhoc_payment_merged_exactly_once() {
    let fixture = Fixture::new();
    let bonus_component = earning("BONUS", CalculationType::Fixed);
    let payment = AdhocPayment::new(fixture.employee_id, "Bonus", dec("5000"));
    let payment_id = payment.id;
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.insert_component(bonus_component.clone());
            tx.insert_adhoc_payment(payment.clone());
            Ok(())
        })
        .unwrap();

    let february = fixture.calculate();
    assert_eq!(item_amount(&february, "BONUS"), Some(dec("5000")));
    assert_eq!(fixture.adhoc(payment_id).processed_in_payslip, Some(february.id));
    // two-phase commit: still pending until the payslip is approved
    assert_eq!(fixture.adhoc(payment_id).status, AdhocStatus::Pending);

    // the next period must not consume it again
    let march_period = fixture.period_for_month(3, 2026);
    let CalculationOutcome::Calculated(march) = fixture
        .engine
        .calculate_payslip(fixture.employee_id, march_period)
        .unwrap()
    else {
        panic!("expected calculation");
    };
    assert_eq!(item_amount(&march, "BONUS"), None);

    fixture.engine.approve_payslip(february.id).unwrap();
    assert_eq!(fixture.adhoc(payment_id).status, AdhocStatus::Processed);
}

#[test]
fn test_adhoc_pinned_to_other_period_is_not_consumed() {
    let fixture = Fixture::new();
    let march_period = fixture.period_for_month(3, 2026);
    let mut payment = AdhocPayment::new(fixture.employee_id, "Year End Bonus", dec("9000"));
    payment.payroll_period_id = Some(march_period);
    let payment_id = payment.id;
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.insert_adhoc_payment(payment.clone());
            Ok(())
        })
        .unwrap();

    let february = fixture.calculate();
    assert!(february.line_items.iter().all(|i| i.amount != dec("9000")));
    assert_eq!(fixture.adhoc(payment_id).processed_in_payslip, None);
}

#[test]
fn test_adhoc_without_matching_component_uses_default_earning() {
    let fixture = Fixture::new();
    let payment = AdhocPayment::new(fixture.employee_id, "Festival Gift", dec("2000"));
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.insert_adhoc_payment(payment.clone());
            Ok(())
        })
        .unwrap();

    let payslip = fixture.calculate();
    // smallest earning code is CONVEYANCE; the gift aggregates into it
    assert_eq!(item_amount(&payslip, "CONVEYANCE"), Some(dec("3600.00")));
}

// =============================================================================
// Batch generation
// =============================================================================

#[test]
fn test_generate_period_reports_processed_and_skipped() {
    let fixture = Fixture::new();
    // a second employee without a salary assignment
    fixture
        .engine
        .store()
        .transaction(|tx| {
            tx.insert_employee(Employee::new(fixture.organization_id, "Vikram Shah"));
            Ok(())
        })
        .unwrap();

    let summary = fixture
        .engine
        .generate_period(fixture.organization_id, 2, 2026)
        .unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 1);
    assert!(summary.errors.is_empty());
    assert_eq!(summary.totals.net_salary, dec("52300.00"));
    // the skipped employee's payslip exists at default zero values
    assert_eq!(summary.totals.payslip_count, 2);
}

#[test]
fn test_generate_period_is_idempotent() {
    let fixture = Fixture::new();

    let first = fixture
        .engine
        .generate_period(fixture.organization_id, 2, 2026)
        .unwrap();
    let second = fixture
        .engine
        .generate_period(fixture.organization_id, 2, 2026)
        .unwrap();

    assert_eq!(first.period_id, second.period_id);
    assert_eq!(first.totals.net_salary, second.totals.net_salary);
    assert_eq!(first.totals.payslip_count, second.totals.payslip_count);
}

#[test]
fn test_period_totals_match_sum_over_payslips() {
    let fixture = Fixture::new();
    fixture
        .engine
        .store()
        .transaction(|tx| {
            let other = tx.insert_employee(Employee::new(fixture.organization_id, "Meera Nair"));
            tx.promote_assignment(SalaryAssignment::new(
                other,
                dec("30000"),
                vec![],
                date(2026, 1, 1),
            ));
            Ok(())
        })
        .unwrap();

    let summary = fixture
        .engine
        .generate_period(fixture.organization_id, 2, 2026)
        .unwrap();

    let payslips = fixture
        .engine
        .store()
        .read(|ledger| ledger.payslips_in_period(summary.period_id));
    let net: Decimal = payslips.iter().map(|p| p.net_salary).sum();
    assert_eq!(summary.totals.net_salary, net);
    assert_eq!(summary.totals.payslip_count as usize, payslips.len());
}

#[test]
fn test_direct_calculation_reports_skip_reason() {
    let fixture = Fixture::new();
    let unassigned = fixture
        .engine
        .store()
        .transaction(|tx| {
            Ok(tx.insert_employee(Employee::new(fixture.organization_id, "Vikram Shah")))
        })
        .unwrap();

    let outcome = fixture
        .engine
        .calculate_payslip(unassigned, fixture.period_id)
        .unwrap();
    assert_eq!(
        outcome,
        CalculationOutcome::Skipped(SkipReason::MissingAssignment)
    );
}

// =============================================================================
// Proration bounds property
// =============================================================================

proptest! {
    #[test]
    fn prop_proration_ratio_stays_within_bounds(
        working_days in 0u32..=366,
        lop_tenths in 0i64..=5000,
    ) {
        let lop = Decimal::new(lop_tenths, 1);
        let result = calculate_proration(working_days, lop);
        prop_assert!(result.ratio >= Decimal::ZERO);
        prop_assert!(result.ratio <= Decimal::ONE);
        prop_assert!(result.paid_days >= Decimal::ZERO);
        prop_assert!(result.paid_days <= Decimal::from(working_days));
    }
}

// =============================================================================
// HTTP surface
// =============================================================================

mod http {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use payroll_engine::api::{AppState, create_router};
    use tower::ServiceExt;

    async fn post_json(
        router: axum::Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_calculate_then_approve_over_http() {
        let fixture = Fixture::new();
        let employee_id = fixture.employee_id;
        let period_id = fixture.period_id;
        let router = create_router(AppState::new(fixture.engine));

        let (status, json) = post_json(
            router.clone(),
            "/payslips/calculate",
            serde_json::json!({ "employee_id": employee_id, "period_id": period_id }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "calculated");
        let payslip_id = json["payslip"]["id"].as_str().unwrap().to_string();

        let (status, json) = post_json(
            router,
            &format!("/payslips/{}/approve", payslip_id),
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "approved");
    }

    #[tokio::test]
    async fn test_generate_period_over_http() {
        let fixture = Fixture::new();
        let organization_id = fixture.organization_id;
        let router = create_router(AppState::new(fixture.engine));

        let (status, json) = post_json(
            router,
            "/periods/generate",
            serde_json::json!({
                "organization_id": organization_id,
                "month": 2,
                "year": 2026,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["processed"], 1);
        assert_eq!(json["errors"].as_array().unwrap().len(), 0);
    }
}

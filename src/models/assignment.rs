//! Salary assignment model.
//!
//! A [`SalaryAssignment`] binds an employee to a base salary amount and a
//! set of component allocations. Exactly one assignment per employee is
//! current at any time; promoting a new assignment demotes the previous one
//! inside the same store transaction. Superseded assignments are kept, never
//! hard-deleted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One component's allocation within a salary assignment.
///
/// For percentage-style components the amount is the pre-computed absolute
/// value of the percentage applied to the base salary at assignment time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentAllocation {
    /// The component this allocation refers to.
    pub component_id: Uuid,
    /// The allocated amount (absolute value or daily rate, depending on the
    /// component's calculation type).
    pub amount: Decimal,
}

/// An employee's salary structure revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryAssignment {
    /// Unique identifier for the assignment.
    pub id: Uuid,
    /// The employee this assignment belongs to.
    pub employee_id: Uuid,
    /// The monthly base ("basic") salary, always prorated by attendance.
    pub base_amount: Decimal,
    /// Component allocations on top of the base salary.
    pub allocations: Vec<ComponentAllocation>,
    /// Whether this is the employee's current revision.
    pub is_current: bool,
    /// The date this revision takes effect.
    pub effective_from: NaiveDate,
}

impl SalaryAssignment {
    /// Creates a new current assignment for an employee.
    pub fn new(
        employee_id: Uuid,
        base_amount: Decimal,
        allocations: Vec<ComponentAllocation>,
        effective_from: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            base_amount,
            allocations,
            is_current: true,
            effective_from,
        }
    }
}

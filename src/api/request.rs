//! Request types for the payroll engine API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for `POST /payslips/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayslipRequest {
    /// The employee to calculate.
    pub employee_id: Uuid,
    /// The payroll period to calculate for.
    pub period_id: Uuid,
}

/// Request body for `POST /periods/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePeriodRequest {
    /// The organization to run payroll for.
    pub organization_id: Uuid,
    /// Calendar month, 1..=12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

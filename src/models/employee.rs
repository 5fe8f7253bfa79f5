//! Employee master record.
//!
//! Employee data is owned by the surrounding HR system; the engine keeps
//! only what payroll generation needs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An employee eligible for payroll processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// The organization the employee belongs to.
    pub organization_id: Uuid,
    /// Display name.
    pub full_name: String,
    /// Inactive employees are skipped by period generation.
    pub is_active: bool,
}

impl Employee {
    /// Creates a new active employee.
    pub fn new(organization_id: Uuid, full_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            full_name: full_name.into(),
            is_active: true,
        }
    }
}

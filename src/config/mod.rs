//! Statutory settings configuration for the payroll engine.
//!
//! This module provides the per-organization statutory deduction settings
//! (contribution rates, wage ceilings, the automatic income tax toggle and
//! the overtime rule) and a loader that reads them from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::SettingsLoader;
//!
//! let loader = SettingsLoader::load("./config/statutory.yaml").unwrap();
//! println!("PF rate: {}%", loader.settings().provident_fund.employee_rate);
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{HealthInsuranceRule, OvertimeRule, ProvidentFundRule, StatutorySettings};

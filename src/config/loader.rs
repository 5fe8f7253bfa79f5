//! Statutory settings loading.
//!
//! This module provides the [`SettingsLoader`] type for loading an
//! organization's statutory settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::StatutorySettings;

/// Loads and provides access to statutory settings.
///
/// # File Format
///
/// ```text
/// provident_fund:
///   enabled: true
///   employee_rate: "12"
///   wage_ceiling: "15000"
///   restrict_base_to_ceiling: true
/// health_insurance:
///   enabled: true
///   employee_rate: "0.75"
///   wage_ceiling: "21000"
/// auto_income_tax: false
/// overtime:
///   multiplier: "2"
///   standard_daily_hours: "8"
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/statutory.yaml").unwrap();
/// assert!(loader.settings().provident_fund.enabled);
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    settings: StatutorySettings,
}

impl SettingsLoader {
    /// Loads settings from the specified YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SettingsNotFound`] if the file is missing and
    /// [`EngineError::SettingsParseError`] if it contains invalid YAML or
    /// is missing required fields.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::SettingsNotFound {
            path: path_str.clone(),
        })?;

        let settings =
            serde_yaml::from_str(&content).map_err(|e| EngineError::SettingsParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { settings })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &StatutorySettings {
        &self.settings
    }

    /// Consumes the loader, yielding the settings.
    pub fn into_settings(self) -> StatutorySettings {
        self.settings
    }
}

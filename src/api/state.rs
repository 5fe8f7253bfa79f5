//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::engine::PayrollEngine;

/// Shared application state.
///
/// Holds the engine handle shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<PayrollEngine>,
}

impl AppState {
    /// Creates a new application state over an engine.
    pub fn new(engine: PayrollEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &PayrollEngine {
        &self.engine
    }
}

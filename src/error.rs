//! Error types for gut-brain simulations.
//!
//! Every fallible operation returns [`SimulationError`]. Failures are
//! surfaced immediately; nothing is retried or recovered locally.

use thiserror::Error;

/// Errors produced by model construction, integration and output sinks.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    #[error("Numerical instability at t = {time}: {variable} became {value}")]
    NumericalInstability {
        time: f64,
        variable: &'static str,
        value: f64,
    },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimulationError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

//! Error types for the price_history crate

use crate::config::ConfigError;
use price_math::MathError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Faults raised by a primary price source.
///
/// These never reach the caller of [`crate::synthesize`]; they select the
/// flat fallback series instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    /// A date in the requested window cannot be represented
    #[error("date out of range: {0} days before {1}")]
    DateOutOfRange(u32, chrono::NaiveDate),

    /// A generated or recorded price is not a positive finite number
    #[error("invalid price {price} at offset {offset}")]
    InvalidPrice { offset: u32, price: f64 },

    /// A recorded source does not cover the requested window
    #[error("insufficient history for `{product}`: need {needed} observations, have {available}")]
    InsufficientHistory {
        product: String,
        needed: usize,
        available: usize,
    },

    /// Any other provider failure
    #[error("upstream failure: {0}")]
    Upstream(String),
}

/// Custom error types for the price_history crate
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Rejected caller input (empty name, negative or oversized window)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A statistic was requested over an empty series
    #[error("Empty series: {0}")]
    EmptySeries(String),

    /// A series failed construction-time validation
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("Math error: {0}")]
    Math(#[from] MathError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Failure payload handed back to the surrounding application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub success: bool,
    pub error: String,
}

impl From<&HistoryError> for ErrorReport {
    fn from(err: &HistoryError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
        }
    }
}

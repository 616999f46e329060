//! # Price Math
//!
//! Numeric building blocks for price history analysis.
//! This crate provides descriptive statistics over price slices and the
//! least-squares trend fit used for short-horizon forecasts.

use thiserror::Error;

pub mod regression;
pub mod stats;

pub use regression::{LinearTrend, TrendFit};
pub use stats::{mean, percent_change, price_range, round_cents, sample_std_dev, volatility_pct};

/// Errors that can occur in price calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for price math operations
pub type Result<T> = std::result::Result<T, MathError>;

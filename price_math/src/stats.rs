//! Descriptive statistics over price slices
//!
//! Contains the helpers used to summarize a price history:
//! - Mean and sample standard deviation
//! - Relative volatility (coefficient of variation, in percent)
//! - Min/max range
//! - Percentage change and cent rounding

use crate::{MathError, Result};
use statrs::statistics::Statistics;

/// Arithmetic mean of the prices
pub fn mean(prices: &[f64]) -> Result<f64> {
    if prices.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot calculate mean of an empty price slice".to_string(),
        ));
    }

    Ok(Statistics::mean(prices.iter()))
}

/// Sample (n - 1) standard deviation of the prices
pub fn sample_std_dev(prices: &[f64]) -> Result<f64> {
    if prices.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Standard deviation needs at least 2 values, have {}.",
            prices.len()
        )));
    }

    Ok(Statistics::std_dev(prices.iter()))
}

/// Volatility as a percentage of the mean price.
///
/// Returns 0 for fewer than two prices, for a constant series, and for a
/// zero mean.
pub fn volatility_pct(prices: &[f64]) -> f64 {
    if prices.len() < 2 || prices.iter().all(|&p| p == prices[0]) {
        return 0.0;
    }

    let avg = Statistics::mean(prices.iter());
    if avg == 0.0 {
        return 0.0;
    }

    100.0 * Statistics::std_dev(prices.iter()) / avg
}

/// Lowest and highest price
pub fn price_range(prices: &[f64]) -> Result<(f64, f64)> {
    let first = prices.first().copied().ok_or_else(|| {
        MathError::InsufficientData("Cannot find the range of an empty price slice".to_string())
    })?;

    Ok(prices
        .iter()
        .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))))
}

/// Percentage change from `from` to `to`.
///
/// The difference is scaled before dividing so that exact inputs such as
/// 100 -> 102 yield exactly 2.0.
pub fn percent_change(from: f64, to: f64) -> Result<f64> {
    if from == 0.0 {
        return Err(MathError::CalculationError(
            "Base price is zero, cannot calculate percentage change".to_string(),
        ));
    }

    Ok((to - from) * 100.0 / from)
}

/// Round a price to two decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

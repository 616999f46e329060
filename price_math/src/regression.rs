//! Least-squares trend fitting for short-horizon price forecasts

use crate::{MathError, Result};

/// Least-squares line over the trailing `period` prices, with x = 1..n
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    period: usize,
}

/// Result of fitting a [`LinearTrend`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    /// Price change per step
    pub slope: f64,
    /// Number of points the line was fitted on
    pub points: usize,
    /// Most recent price in the fitted window
    pub last_value: f64,
}

impl LinearTrend {
    /// Create a new trend fitter over the specified trailing period
    pub fn new(period: usize) -> Result<Self> {
        if period < 2 {
            return Err(MathError::InvalidInput(
                "Period must be at least 2 for a trend fit".to_string(),
            ));
        }

        Ok(Self { period })
    }

    /// Get the trailing period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Fit the line to the last `period` prices (or fewer, if that is all there is).
    ///
    /// slope = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)
    pub fn fit(&self, prices: &[f64]) -> Result<TrendFit> {
        let window = &prices[prices.len().saturating_sub(self.period)..];
        if window.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Trend fit needs at least 2 points, have {}.",
                window.len()
            )));
        }

        let n = window.len() as f64;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
        for (i, &y) in window.iter().enumerate() {
            let x = (i + 1) as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_x2 += x * x;
        }

        let denominator = n * sum_x2 - sum_x * sum_x;
        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        Ok(TrendFit {
            slope: (n * sum_xy - sum_x * sum_y) / denominator,
            points: window.len(),
            last_value: window[window.len() - 1],
        })
    }
}

impl TrendFit {
    /// Project the most recent price `steps_ahead` steps along the slope
    pub fn project(&self, steps_ahead: u32) -> f64 {
        self.last_value + self.slope * f64::from(steps_ahead)
    }
}

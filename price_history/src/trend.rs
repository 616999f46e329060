//! Trend classification and short-horizon forecasting

use crate::data::{Confidence, Direction, PriceObservation};
use price_math::{mean, percent_change, round_cents, LinearTrend};
use serde::{Deserialize, Serialize};

/// Observations used to judge the recent direction
pub const RECENT_WINDOW: usize = 7;
/// Observations the forecast line is fitted on
pub const FORECAST_WINDOW: usize = 14;
/// Forecast horizons in days
pub const WEEK_HORIZON: u32 = 7;
pub const MONTH_HORIZON: u32 = 30;
/// Slopes at or below this magnitude (price units per day) forecast with high confidence
pub const HIGH_CONFIDENCE_MAX_SLOPE: f64 = 1.0;

/// Projected prices one week and one month ahead
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub next_week: f64,
    pub next_month: f64,
    pub confidence: Confidence,
}

/// Direction and forecast for a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Last price minus first price
    pub overall_change: f64,
    /// `overall_change` as a percentage of the first price
    pub pct_change: f64,
    pub direction: Direction,
    /// Direction over the trailing observations
    pub recent_direction: Direction,
    pub forecast: Forecast,
}

/// Classify the trend of `observations` and forecast from its tail.
///
/// Series shorter than two points resolve to a stable, low-confidence result
/// rather than an error.
pub fn analyze(observations: &[PriceObservation]) -> TrendAnalysis {
    let prices: Vec<f64> = observations.iter().map(|o| o.price).collect();
    let (first, current) = match (prices.first(), prices.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => (0.0, 0.0),
    };

    let overall_change = current - first;
    let pct_change = percent_change(first, current).unwrap_or(0.0);

    TrendAnalysis {
        overall_change: round_cents(overall_change),
        pct_change: round_cents(pct_change),
        direction: Direction::from_pct_change(pct_change),
        recent_direction: recent_direction(&prices),
        forecast: forecast(&prices),
    }
}

/// Compare the mean of the first half of the trailing window against the second half
fn recent_direction(prices: &[f64]) -> Direction {
    let recent = &prices[prices.len().saturating_sub(RECENT_WINDOW)..];
    if recent.len() < 2 {
        return Direction::Stable;
    }

    let (older, newer) = recent.split_at(recent.len() / 2);
    match (mean(older), mean(newer)) {
        (Ok(older), Ok(newer)) => percent_change(older, newer)
            .map(Direction::from_pct_change)
            .unwrap_or(Direction::Stable),
        _ => Direction::Stable,
    }
}

/// Project the trailing least-squares slope 7 and 30 days ahead.
///
/// Confidence is high when the slope magnitude is at most 1, medium above.
fn forecast(prices: &[f64]) -> Forecast {
    let current = prices.last().copied().unwrap_or(0.0);
    let fit = LinearTrend::new(FORECAST_WINDOW).and_then(|trend| trend.fit(prices));

    match fit {
        Ok(fit) => Forecast {
            next_week: round_cents(fit.project(WEEK_HORIZON)),
            next_month: round_cents(fit.project(MONTH_HORIZON)),
            confidence: if fit.slope.abs() <= HIGH_CONFIDENCE_MAX_SLOPE {
                Confidence::High
            } else {
                Confidence::Medium
            },
        },
        Err(_) => Forecast {
            next_week: current,
            next_month: current,
            confidence: Confidence::Low,
        },
    }
}

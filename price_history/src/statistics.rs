//! Summary statistics over a price series

use crate::data::PriceObservation;
use crate::error::{HistoryError, Result};
use price_math::{mean, price_range, round_cents, volatility_pct};
use serde::{Deserialize, Serialize};

/// Summary of the prices in a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// `max - min`
    pub range: f64,
    /// Sample standard deviation as a percentage of the mean; 0 below two prices
    pub volatility_pct: f64,
}

/// Aggregate the prices of `observations`.
///
/// An empty slice is a caller error.
pub fn aggregate(observations: &[PriceObservation]) -> Result<SeriesStatistics> {
    if observations.is_empty() {
        return Err(HistoryError::EmptySeries(
            "cannot aggregate statistics over an empty series".to_string(),
        ));
    }

    let prices: Vec<f64> = observations.iter().map(|o| o.price).collect();
    let (min, max) = price_range(&prices)?;

    Ok(SeriesStatistics {
        min,
        max,
        mean: round_cents(mean(&prices)?),
        range: round_cents(max - min),
        volatility_pct: volatility_pct(&prices),
    })
}

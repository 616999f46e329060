//! Price observations and validated price series

use crate::error::{HistoryError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock status reported alongside a price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    OutOfStock,
    Unknown,
}

impl Availability {
    /// Parse the wire form, treating anything unrecognized as unknown
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "in_stock" | "instock" | "available" => Availability::InStock,
            "out_of_stock" | "outofstock" | "unavailable" => Availability::OutOfStock,
            _ => Availability::Unknown,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Availability::InStock => "in_stock",
            Availability::OutOfStock => "out_of_stock",
            Availability::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Direction of a price movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increasing,
    Decreasing,
    Stable,
}

impl Direction {
    /// Threshold, in percent, beyond which a change counts as a move
    pub const THRESHOLD_PCT: f64 = 2.0;

    /// Classify a percentage change: strictly beyond ±2% is a move
    pub fn from_pct_change(pct_change: f64) -> Self {
        if pct_change > Self::THRESHOLD_PCT {
            Direction::Increasing
        } else if pct_change < -Self::THRESHOLD_PCT {
            Direction::Decreasing
        } else {
            Direction::Stable
        }
    }
}

/// Confidence attached to a forecast or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// One day's price at one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// Price in `currency`, rounded to cents
    pub price: f64,
    /// Store label
    pub store: String,
    /// ISO 4217 currency code
    pub currency: String,
    pub availability: Availability,
}

/// Non-empty sequence of observations, strictly increasing by date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceObservation>", into = "Vec<PriceObservation>")]
pub struct PriceSeries {
    observations: Vec<PriceObservation>,
}

impl PriceSeries {
    /// Create a series, validating ordering and prices
    pub fn new(observations: Vec<PriceObservation>) -> Result<Self> {
        if observations.is_empty() {
            return Err(HistoryError::EmptySeries(
                "a price series needs at least one observation".to_string(),
            ));
        }

        if let Some(pair) = observations.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(HistoryError::InvalidSeries(format!(
                "dates must be strictly increasing, found {} followed by {}",
                pair[0].date, pair[1].date
            )));
        }

        if let Some(bad) = observations
            .iter()
            .find(|o| !o.price.is_finite() || o.price <= 0.0)
        {
            return Err(HistoryError::InvalidSeries(format!(
                "price must be positive, found {} on {}",
                bad.price, bad.date
            )));
        }

        Ok(Self { observations })
    }

    /// Wrap observations the caller already produced in strictly increasing
    /// date order with positive prices.
    pub(crate) fn from_ordered(observations: Vec<PriceObservation>) -> Self {
        debug_assert!(!observations.is_empty());
        Self { observations }
    }

    /// All observations, oldest first
    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    /// The prices, oldest first
    pub fn prices(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.price).collect()
    }

    /// Number of observations (never zero)
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Oldest observation
    pub fn first(&self) -> &PriceObservation {
        &self.observations[0]
    }

    /// Most recent observation
    pub fn current(&self) -> &PriceObservation {
        &self.observations[self.observations.len() - 1]
    }

    /// Price of the most recent observation
    pub fn current_price(&self) -> f64 {
        self.current().price
    }

    pub fn period_start(&self) -> NaiveDate {
        self.first().date
    }

    pub fn period_end(&self) -> NaiveDate {
        self.current().date
    }
}

impl TryFrom<Vec<PriceObservation>> for PriceSeries {
    type Error = HistoryError;

    fn try_from(observations: Vec<PriceObservation>) -> Result<Self> {
        Self::new(observations)
    }
}

impl From<PriceSeries> for Vec<PriceObservation> {
    fn from(series: PriceSeries) -> Self {
        series.observations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(day: u32, price: f64) -> PriceObservation {
        PriceObservation {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            price,
            store: "Amazon".to_string(),
            currency: "USD".to_string(),
            availability: Availability::InStock,
        }
    }

    #[test]
    fn test_series_accessors() {
        let series = PriceSeries::new(vec![obs(1, 10.0), obs(2, 12.5), obs(5, 11.0)]).unwrap();

        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.prices(), vec![10.0, 12.5, 11.0]);
        assert_eq!(series.current_price(), 11.0);
        assert_eq!(series.period_start(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(series.period_end(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_series_validation() {
        assert!(matches!(
            PriceSeries::new(Vec::new()),
            Err(HistoryError::EmptySeries(_))
        ));
        assert!(matches!(
            PriceSeries::new(vec![obs(2, 10.0), obs(2, 11.0)]),
            Err(HistoryError::InvalidSeries(_))
        ));
        assert!(matches!(
            PriceSeries::new(vec![obs(3, 10.0), obs(1, 11.0)]),
            Err(HistoryError::InvalidSeries(_))
        ));
        assert!(PriceSeries::new(vec![obs(1, 0.0)]).is_err());
        assert!(PriceSeries::new(vec![obs(1, f64::NAN)]).is_err());
    }

    #[test]
    fn test_direction_thresholds() {
        assert_eq!(Direction::from_pct_change(2.0), Direction::Stable);
        assert_eq!(Direction::from_pct_change(-2.0), Direction::Stable);
        assert_eq!(Direction::from_pct_change(2.01), Direction::Increasing);
        assert_eq!(Direction::from_pct_change(-2.01), Direction::Decreasing);
        assert_eq!(Direction::from_pct_change(0.0), Direction::Stable);
    }

    #[test]
    fn test_availability_parse() {
        assert_eq!(Availability::parse("In Stock"), Availability::InStock);
        assert_eq!(Availability::parse("out-of-stock"), Availability::OutOfStock);
        assert_eq!(Availability::parse("???"), Availability::Unknown);
        assert_eq!(Availability::OutOfStock.to_string(), "out_of_stock");
    }

    #[test]
    fn test_series_json_shape() {
        let series = PriceSeries::new(vec![obs(1, 10.0)]).unwrap();
        let json = serde_json::to_value(&series).unwrap();

        assert_eq!(json[0]["date"], "2024-03-01");
        assert_eq!(json[0]["availability"], "in_stock");

        let empty: std::result::Result<PriceSeries, _> = serde_json::from_str("[]");
        assert!(empty.is_err());
    }
}

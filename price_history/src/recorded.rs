//! Recorded (real) price histories loaded from CSV

use crate::data::{Availability, PriceObservation, PriceSeries};
use crate::error::{Result, SynthesisError};
use crate::synthesizer::{PriceSource, DEFAULT_CURRENCY};
use chrono::{Days, NaiveDate};
use rand::RngCore;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One CSV row: `product,date,price,store,currency,availability`
#[derive(Debug, Deserialize)]
struct RecordedRow {
    product: String,
    date: NaiveDate,
    price: f64,
    #[serde(default)]
    store: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    availability: Option<String>,
}

/// Price source backed by previously observed prices.
///
/// Products are matched case-insensitively on their trimmed name.
#[derive(Debug, Clone, Default)]
pub struct RecordedSource {
    label: String,
    histories: HashMap<String, Vec<PriceObservation>>,
}

impl RecordedSource {
    /// Create an empty recorded source
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            histories: HashMap::new(),
        }
    }

    /// Load recorded prices from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(label: impl Into<String>, path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(label, file)
    }

    /// Load recorded prices from any CSV reader with a header row
    pub fn from_reader<R: Read>(label: impl Into<String>, reader: R) -> Result<Self> {
        let mut source = Self::new(label);
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut grouped: HashMap<String, Vec<PriceObservation>> = HashMap::new();
        for row in csv_reader.deserialize::<RecordedRow>() {
            let row = row?;
            grouped.entry(normalize(&row.product)).or_default().push(PriceObservation {
                date: row.date,
                price: row.price,
                store: row.store.unwrap_or_else(|| "Unknown".to_string()),
                currency: row
                    .currency
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                availability: row
                    .availability
                    .as_deref()
                    .map(Availability::parse)
                    .unwrap_or(Availability::Unknown),
            });
        }

        for (product, observations) in grouped {
            source.insert(&product, observations);
        }

        Ok(source)
    }

    /// Add observations for a product; on duplicate dates the later entry wins
    pub fn insert(&mut self, product_name: &str, observations: Vec<PriceObservation>) {
        let history = self.histories.entry(normalize(product_name)).or_default();
        history.extend(observations);
        // Stable sort keeps insertion order within a date, so dedup keeps the last
        history.sort_by_key(|o| o.date);
        history.reverse();
        history.dedup_by_key(|o| o.date);
        history.reverse();
    }

    /// Number of products with recorded prices
    pub fn product_count(&self) -> usize {
        self.histories.len()
    }
}

impl PriceSource for RecordedSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn price_series(
        &self,
        product_name: &str,
        window_days: u32,
        today: NaiveDate,
        _rng: &mut dyn RngCore,
    ) -> std::result::Result<PriceSeries, SynthesisError> {
        let history = self.histories.get(&normalize(product_name)).ok_or_else(|| {
            SynthesisError::Upstream(format!("no recorded history for `{product_name}`"))
        })?;

        // One observation per day from `today - window_days` through `today`
        let start = today
            .checked_sub_days(Days::new(u64::from(window_days)))
            .ok_or(SynthesisError::DateOutOfRange(window_days, today))?;
        let window: Vec<&PriceObservation> = history
            .iter()
            .filter(|o| o.date >= start && o.date <= today)
            .collect();
        let needed = window_days as usize + 1;
        if window.len() != needed {
            return Err(SynthesisError::InsufficientHistory {
                product: product_name.to_string(),
                needed,
                available: window.len(),
            });
        }

        for obs in &window {
            if !obs.price.is_finite() || obs.price <= 0.0 {
                let offset = (today - obs.date).num_days().clamp(0, i64::from(u32::MAX));
                return Err(SynthesisError::InvalidPrice {
                    offset: offset as u32,
                    price: obs.price,
                });
            }
        }

        debug!(
            product = product_name,
            source = %self.label,
            observations = window.len(),
            "serving recorded history"
        );
        Ok(PriceSeries::from_ordered(
            window.into_iter().cloned().collect(),
        ))
    }
}

fn normalize(product_name: &str) -> String {
    product_name.trim().to_lowercase()
}

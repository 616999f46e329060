//! Price series synthesis
//!
//! A [`PriceSource`] produces the history for a product. The seasonal
//! synthesizer builds a noisy daily series from the product profile; when a
//! source fails, [`synthesize`] substitutes a flat low-variance series so the
//! caller always gets a history back.

use crate::data::{Availability, PriceObservation, PriceSeries};
use crate::error::SynthesisError;
use crate::profile::{ProductProfile, DEFAULT_BASE_PRICE};
use chrono::{Days, NaiveDate};
use price_math::round_cents;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Stores quoted when none are configured
pub const DEFAULT_STORES: &[&str] = &["Amazon", "Best Buy", "Walmart", "Target", "Newegg"];

/// Currency quoted when none is configured
pub const DEFAULT_CURRENCY: &str = "USD";

/// Promotional discount windows as (first offset, last offset, multiplier delta)
const DISCOUNT_WINDOWS: &[(u32, u32, f64)] = &[(25, 30, -0.25), (60, 65, -0.15), (10, 15, -0.10)];

const SEASONAL_AMPLITUDE: f64 = 0.1;
const NOISE_AMPLITUDE: f64 = 0.15;
const DRIFT: f64 = 0.05;
const MAX_STOCKOUT_PROBABILITY: f64 = 0.3;
const FALLBACK_NOISE: f64 = 0.02;

/// Anything that can supply a daily price history ending at `today`
pub trait PriceSource {
    /// Label reported as the `source` of a history
    fn name(&self) -> &str;

    /// Produce `window_days + 1` daily observations, oldest first
    fn price_series(
        &self,
        product_name: &str,
        window_days: u32,
        today: NaiveDate,
        rng: &mut dyn RngCore,
    ) -> Result<PriceSeries, SynthesisError>;
}

/// Seasonal + noise + drift + promotions price generator
#[derive(Debug, Clone)]
pub struct SeasonalSynthesizer {
    label: String,
    currency: String,
    stores: Vec<String>,
}

impl Default for SeasonalSynthesizer {
    fn default() -> Self {
        Self {
            label: "synthetic".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            stores: DEFAULT_STORES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SeasonalSynthesizer {
    /// Create a synthesizer with the default stores and currency
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_stores<I, S>(mut self, stores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stores = stores.into_iter().map(Into::into).collect();
        self
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn stores(&self) -> &[String] {
        &self.stores
    }

    /// Price multiplier components for day offset `d` (excluding noise)
    fn deterministic_shift(offset: u32, window_days: u32) -> f64 {
        let ratio = elapsed_ratio(offset, window_days);
        let seasonality = SEASONAL_AMPLITUDE * (2.0 * PI * ratio).sin();
        let trend = DRIFT * ratio;

        seasonality - trend + discount(offset)
    }
}

impl PriceSource for SeasonalSynthesizer {
    fn name(&self) -> &str {
        &self.label
    }

    fn price_series(
        &self,
        product_name: &str,
        window_days: u32,
        today: NaiveDate,
        rng: &mut dyn RngCore,
    ) -> Result<PriceSeries, SynthesisError> {
        if self.stores.is_empty() {
            return Err(SynthesisError::Upstream("no stores configured".to_string()));
        }

        let profile = ProductProfile::classify(product_name);
        let base_price = profile.base_price();
        debug!(
            product = product_name,
            category = %profile.category,
            brand = profile.brand.as_deref().unwrap_or("unknown"),
            premium = profile.is_premium,
            base_price,
            "classified product"
        );

        let mut observations = Vec::with_capacity(window_days as usize + 1);
        for offset in (0..=window_days).rev() {
            let date = today
                .checked_sub_days(Days::new(u64::from(offset)))
                .ok_or(SynthesisError::DateOutOfRange(offset, today))?;

            let noise = rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
            let multiplier = 1.0 + Self::deterministic_shift(offset, window_days) + noise;
            let price = round_cents(base_price * multiplier);
            if !price.is_finite() || price <= 0.0 {
                return Err(SynthesisError::InvalidPrice { offset, price });
            }

            let store = self
                .stores
                .choose(rng)
                .cloned()
                .ok_or_else(|| SynthesisError::Upstream("no stores configured".to_string()))?;

            let in_stock_probability =
                1.0 - MAX_STOCKOUT_PROBABILITY * elapsed_ratio(offset, window_days);
            let availability = if rng.gen_bool(in_stock_probability) {
                Availability::InStock
            } else {
                Availability::OutOfStock
            };

            observations.push(PriceObservation {
                date,
                price,
                store,
                currency: self.currency.clone(),
                availability,
            });
        }

        Ok(PriceSeries::from_ordered(observations))
    }
}

/// `offset / window_days`, or 0 for an empty window
fn elapsed_ratio(offset: u32, window_days: u32) -> f64 {
    if window_days == 0 {
        0.0
    } else {
        f64::from(offset) / f64::from(window_days)
    }
}

/// Promotional discount applied at a day offset
pub fn discount(offset: u32) -> f64 {
    DISCOUNT_WINDOWS
        .iter()
        .find(|(start, end, _)| (*start..=*end).contains(&offset))
        .map(|&(_, _, delta)| delta)
        .unwrap_or(0.0)
}

/// Flat series around [`DEFAULT_BASE_PRICE`] with ±2% noise, all in stock.
///
/// Offsets whose date cannot be represented are skipped; `today` always can.
pub fn fallback_series(
    window_days: u32,
    today: NaiveDate,
    currency: &str,
    stores: &[String],
    rng: &mut dyn RngCore,
) -> PriceSeries {
    let observations = (0..=window_days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| {
            let noise = rng.gen_range(-FALLBACK_NOISE..=FALLBACK_NOISE);
            let store = stores
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| DEFAULT_STORES[0].to_string());

            PriceObservation {
                date,
                price: round_cents(DEFAULT_BASE_PRICE * (1.0 + noise)),
                store,
                currency: currency.to_string(),
                availability: Availability::InStock,
            }
        })
        .collect();

    PriceSeries::from_ordered(observations)
}

/// A history together with how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutcome {
    pub series: PriceSeries,
    /// True when the source failed and the flat fallback was used
    pub is_fallback: bool,
}

/// Ask `source` for a history, falling back to [`fallback_series`] on any fault
pub fn synthesize<S: PriceSource + ?Sized>(
    source: &S,
    product_name: &str,
    window_days: u32,
    today: NaiveDate,
    currency: &str,
    stores: &[String],
    rng: &mut dyn RngCore,
) -> SynthesisOutcome {
    match source.price_series(product_name, window_days, today, rng) {
        Ok(series) => SynthesisOutcome {
            series,
            is_fallback: false,
        },
        Err(err) => {
            warn!(
                product = product_name,
                source = source.name(),
                window_days,
                error = %err,
                "price source failed, using flat fallback series"
            );
            SynthesisOutcome {
                series: fallback_series(window_days, today, currency, stores, rng),
                is_fallback: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    struct BrokenSource;

    impl PriceSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        fn price_series(
            &self,
            _product_name: &str,
            _window_days: u32,
            _today: NaiveDate,
            _rng: &mut dyn RngCore,
        ) -> Result<PriceSeries, SynthesisError> {
            Err(SynthesisError::Upstream("provider offline".to_string()))
        }
    }

    #[test]
    fn test_discount_windows() {
        assert_eq!(discount(25), -0.25);
        assert_eq!(discount(30), -0.25);
        assert_eq!(discount(31), 0.0);
        assert_eq!(discount(60), -0.15);
        assert_eq!(discount(65), -0.15);
        assert_eq!(discount(10), -0.10);
        assert_eq!(discount(15), -0.10);
        assert_eq!(discount(0), 0.0);
        assert_eq!(discount(45), 0.0);
    }

    #[test]
    fn test_deterministic_shift() {
        // Oldest day of a 90-day window: sin(2π) ≈ 0, full drift, no promotion
        assert_relative_eq!(
            SeasonalSynthesizer::deterministic_shift(90, 90),
            -DRIFT,
            epsilon = 1e-12
        );
        // Today: no seasonality, no drift
        assert_eq!(SeasonalSynthesizer::deterministic_shift(0, 90), 0.0);
        // Degenerate window must not divide by zero
        assert_eq!(SeasonalSynthesizer::deterministic_shift(0, 0), 0.0);
    }

    #[test]
    fn test_series_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = SeasonalSynthesizer::new()
            .price_series("Logitech mouse", 30, today(), &mut rng)
            .unwrap();

        assert_eq!(series.len(), 31);
        assert_eq!(series.period_end(), today());
        assert_eq!(series.period_start(), NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        for obs in series.observations() {
            assert_eq!(obs.currency, "USD");
            assert!(DEFAULT_STORES.contains(&obs.store.as_str()));
            assert_ne!(obs.availability, Availability::Unknown);
        }
    }

    #[test]
    fn test_prices_stay_within_multiplier_bounds() {
        let mut rng = StdRng::seed_from_u64(99);
        let series = SeasonalSynthesizer::new()
            .price_series("Sony WH-1000XM4 headphones", 90, today(), &mut rng)
            .unwrap();

        // 1 ± 0.1 seasonality ± 0.15 noise − up to 0.05 drift − up to 0.25 promotion
        for price in series.prices() {
            assert!(price >= round_cents(299.0 * 0.45));
            assert!(price <= round_cents(299.0 * 1.25));
        }
    }

    #[test]
    fn test_today_is_always_in_stock() {
        // P(in stock) is 1 at offset 0
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let series = SeasonalSynthesizer::new()
                .price_series("keyboard", 5, today(), &mut rng)
                .unwrap();
            assert_eq!(series.current().availability, Availability::InStock);
        }
    }

    #[test]
    fn test_no_stores_is_a_source_fault() {
        let mut rng = StdRng::seed_from_u64(1);
        let synthesizer = SeasonalSynthesizer::new().with_stores(Vec::<String>::new());

        assert!(matches!(
            synthesizer.price_series("mouse", 3, today(), &mut rng),
            Err(SynthesisError::Upstream(_))
        ));
    }

    #[test]
    fn test_fallback_series_is_flat() {
        let mut rng = StdRng::seed_from_u64(3);
        let stores = vec!["Target".to_string()];
        let series = fallback_series(14, today(), "EUR", &stores, &mut rng);

        assert_eq!(series.len(), 15);
        assert_eq!(series.period_end(), today());
        for obs in series.observations() {
            assert!(obs.price >= 97.99 && obs.price <= 101.99);
            assert_eq!(obs.store, "Target");
            assert_eq!(obs.currency, "EUR");
            assert_eq!(obs.availability, Availability::InStock);
        }
    }

    #[test]
    fn test_synthesize_falls_back_on_fault() {
        let mut rng = StdRng::seed_from_u64(11);
        let stores: Vec<String> = DEFAULT_STORES.iter().map(|s| s.to_string()).collect();
        let outcome = synthesize(&BrokenSource, "anything", 7, today(), "USD", &stores, &mut rng);

        assert!(outcome.is_fallback);
        assert_eq!(outcome.series.len(), 8);
    }

    #[test]
    fn test_synthesize_uses_primary_source() {
        let mut rng = StdRng::seed_from_u64(11);
        let stores: Vec<String> = DEFAULT_STORES.iter().map(|s| s.to_string()).collect();
        let outcome = synthesize(
            &SeasonalSynthesizer::new(),
            "mouse",
            7,
            today(),
            "USD",
            &stores,
            &mut rng,
        );

        assert!(!outcome.is_fallback);
        assert_eq!(outcome.series.len(), 8);
    }
}

//! The history and trend contract consumed by the surrounding application

use crate::config::EngineConfig;
use crate::data::PriceObservation;
use crate::error::{HistoryError, Result};
use crate::recommendation::{price_alerts, recommend, PriceAlerts, Recommendation};
use crate::statistics::{aggregate, SeriesStatistics};
use crate::synthesizer::{synthesize, PriceSource, SeasonalSynthesizer, SynthesisOutcome};
use crate::trend::{analyze, TrendAnalysis};
use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Response to a history request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReport {
    pub success: bool,
    pub product_name: String,
    pub price_history: Vec<PriceObservation>,
    pub period_days: u32,
    pub current_price: f64,
    pub source: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fallback: Option<bool>,
}

/// Everything derived from a history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDetails {
    pub current_price: f64,
    pub price_statistics: SeriesStatistics,
    pub trend_analysis: TrendAnalysis,
    pub buy_recommendation: Recommendation,
    pub price_alerts: PriceAlerts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisTimestamps {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub analysis_date: DateTime<Utc>,
}

/// Response to a trends request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub success: bool,
    pub product_name: String,
    pub analysis: TrendDetails,
    pub timestamps: AnalysisTimestamps,
}

impl HistoryReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TrendReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Price history front end over a [`PriceSource`] and a random source
#[derive(Debug)]
pub struct PriceHistoryService<S = SeasonalSynthesizer, R = StdRng> {
    source: S,
    rng: R,
    config: EngineConfig,
}

impl PriceHistoryService<SeasonalSynthesizer, StdRng> {
    /// Seasonal synthesizer configured from `config`, seeded from
    /// `config.seed` or from entropy
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let source = SeasonalSynthesizer::new()
            .with_label(config.source_label.clone())
            .with_currency(config.currency.clone())
            .with_stores(config.stores.clone());
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self { source, rng, config })
    }
}

impl<S: PriceSource, R: RngCore> PriceHistoryService<S, R> {
    pub fn new(source: S, rng: R, config: EngineConfig) -> Self {
        Self { source, rng, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// History for `product_name` over the last `days` days, ending now
    pub fn get_history(&mut self, product_name: &str, days: i64) -> Result<HistoryReport> {
        self.get_history_at(product_name, days, Utc::now())
    }

    /// History for `product_name` over the `days` days ending at `as_of`
    pub fn get_history_at(
        &mut self,
        product_name: &str,
        days: i64,
        as_of: DateTime<Utc>,
    ) -> Result<HistoryReport> {
        let product_name = validate_product_name(product_name)?;
        let window_days = self.validate_window(days)?;
        let outcome = self.fetch(product_name, window_days, as_of.date_naive());

        info!(
            product = product_name,
            window_days,
            source = self.source.name(),
            is_fallback = outcome.is_fallback,
            "built price history"
        );

        let current_price = outcome.series.current_price();
        Ok(HistoryReport {
            success: true,
            product_name: product_name.to_string(),
            price_history: outcome.series.into(),
            period_days: window_days,
            current_price,
            source: self.source.name().to_string(),
            last_updated: as_of,
            is_fallback: outcome.is_fallback.then_some(true),
        })
    }

    /// Statistics, trend, forecast and verdict over the default window, ending now
    pub fn get_trends(&mut self, product_name: &str) -> Result<TrendReport> {
        self.get_trends_at(product_name, Utc::now())
    }

    /// Statistics, trend, forecast and verdict over the default window ending at `as_of`
    pub fn get_trends_at(
        &mut self,
        product_name: &str,
        as_of: DateTime<Utc>,
    ) -> Result<TrendReport> {
        let product_name = validate_product_name(product_name)?;
        let window_days = self.config.default_window_days;
        let outcome = self.fetch(product_name, window_days, as_of.date_naive());
        let series = &outcome.series;

        let statistics = aggregate(series.observations())?;
        let trend = analyze(series.observations());
        let current_price = series.current_price();
        let verdict = recommend(current_price, &statistics, trend.recent_direction);

        info!(
            product = product_name,
            window_days,
            is_fallback = outcome.is_fallback,
            action = ?verdict.action,
            direction = ?trend.direction,
            "built trend analysis"
        );

        Ok(TrendReport {
            success: true,
            product_name: product_name.to_string(),
            analysis: TrendDetails {
                current_price,
                price_statistics: statistics,
                trend_analysis: trend,
                buy_recommendation: verdict,
                price_alerts: price_alerts(current_price, &statistics),
            },
            timestamps: AnalysisTimestamps {
                period_start: series.period_start(),
                period_end: series.period_end(),
                analysis_date: as_of,
            },
        })
    }

    fn fetch(&mut self, product_name: &str, window_days: u32, today: NaiveDate) -> SynthesisOutcome {
        synthesize(
            &self.source,
            product_name,
            window_days,
            today,
            &self.config.currency,
            &self.config.stores,
            &mut self.rng,
        )
    }

    fn validate_window(&self, days: i64) -> Result<u32> {
        if days < 0 {
            return Err(HistoryError::InvalidInput(format!(
                "days must not be negative, got {days}"
            )));
        }

        match u32::try_from(days) {
            Ok(days) if days <= self.config.max_window_days => Ok(days),
            _ => Err(HistoryError::InvalidInput(format!(
                "days must be at most {}, got {days}",
                self.config.max_window_days
            ))),
        }
    }
}

fn validate_product_name(product_name: &str) -> Result<&str> {
    let trimmed = product_name.trim();
    if trimmed.is_empty() {
        return Err(HistoryError::InvalidInput(
            "product name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service(seed: u64) -> PriceHistoryService {
        let config = EngineConfig {
            seed: Some(seed),
            ..Default::default()
        };
        PriceHistoryService::from_config(config).unwrap()
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 29, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut svc = service(1);

        assert!(matches!(
            svc.get_history_at("   ", 10, as_of()),
            Err(HistoryError::InvalidInput(_))
        ));
        assert!(matches!(
            svc.get_history_at("mouse", -1, as_of()),
            Err(HistoryError::InvalidInput(_))
        ));
        assert!(matches!(
            svc.get_history_at("mouse", 731, as_of()),
            Err(HistoryError::InvalidInput(_))
        ));
        assert!(svc.get_trends_at("", as_of()).is_err());
    }

    #[test]
    fn test_history_report_fields() {
        let mut svc = service(5);
        let report = svc.get_history_at("  Razer mouse ", 10, as_of()).unwrap();

        assert!(report.success);
        assert_eq!(report.product_name, "Razer mouse");
        assert_eq!(report.price_history.len(), 11);
        assert_eq!(report.period_days, 10);
        assert_eq!(report.current_price, report.price_history[10].price);
        assert_eq!(report.source, "synthetic");
        assert_eq!(report.last_updated, as_of());
        assert_eq!(report.is_fallback, None);
    }

    #[test]
    fn test_is_fallback_is_omitted_from_json() {
        let mut svc = service(5);
        let json = svc.get_history_at("mouse", 3, as_of()).unwrap().to_json().unwrap();

        assert!(!json.contains("is_fallback"));
        assert!(json.contains("\"price_history\""));
    }
}

//! # Price History
//!
//! Price history synthesis, trend analysis and purchase recommendations.
//!
//! ## Pipeline
//!
//! - **Synthesis**: a [`PriceSource`] turns a product name into a daily
//!   [`PriceSeries`]; faults fall back to a flat series
//! - **Statistics**: min, max, mean, range and relative volatility
//! - **Trend & forecast**: overall and recent direction, least-squares
//!   projection one week and one month ahead
//! - **Recommendation**: buy now, good deal, wait or neutral, from where the
//!   current price sits in the historical range
//!
//! Randomness is always injected, so a fixed seed gives a fixed history.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use price_history::{aggregate, analyze, recommend, PriceSource, SeasonalSynthesizer};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let today = NaiveDate::from_ymd_opt(2024, 11, 29).unwrap();
//!
//! let series = SeasonalSynthesizer::new()
//!     .price_series("Sony WH-1000XM4 headphones", 90, today, &mut rng)
//!     .unwrap();
//! assert_eq!(series.len(), 91);
//!
//! let stats = aggregate(series.observations()).unwrap();
//! let trend = analyze(series.observations());
//! let verdict = recommend(series.current_price(), &stats, trend.recent_direction);
//! println!("{:?}: {}", verdict.action, verdict.reason);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod profile;
pub mod recommendation;
pub mod recorded;
pub mod service;
pub mod statistics;
pub mod synthesizer;
pub mod trend;

// Re-export commonly used types
pub use crate::config::{ConfigError, EngineConfig};
pub use crate::data::{Availability, Confidence, Direction, PriceObservation, PriceSeries};
pub use crate::error::{ErrorReport, HistoryError, Result, SynthesisError};
pub use crate::profile::{Category, ProductProfile};
pub use crate::recommendation::{price_alerts, recommend, Action, PriceAlerts, Recommendation};
pub use crate::recorded::RecordedSource;
pub use crate::service::{HistoryReport, PriceHistoryService, TrendReport};
pub use crate::statistics::{aggregate, SeriesStatistics};
pub use crate::synthesizer::{
    fallback_series, synthesize, PriceSource, SeasonalSynthesizer, SynthesisOutcome,
};
pub use crate::trend::{analyze, Forecast, TrendAnalysis};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

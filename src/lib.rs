//! # Pricewatch
//!
//! `pricewatch` bundles the price history engine and its numeric helpers.
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use pricewatch::{EngineConfig, PriceHistoryService};
//!
//! let config = EngineConfig { seed: Some(7), ..Default::default() };
//! let mut service = PriceHistoryService::from_config(config).unwrap();
//!
//! let as_of = Utc.with_ymd_and_hms(2024, 11, 29, 0, 0, 0).unwrap();
//! let history = service.get_history_at("Logitech MX Master 3S", 30, as_of).unwrap();
//! assert_eq!(history.price_history.len(), 31);
//! ```

pub use price_history::*;

/// Numeric helpers used by the engine
pub mod math {
    pub use price_math::*;
}

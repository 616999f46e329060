//! Purchase recommendations and price alerts

use crate::data::{Confidence, Direction};
use crate::statistics::SeriesStatistics;
use price_math::round_cents;
use serde::{Deserialize, Serialize};

/// Positions at or below this are near the historical low
pub const BUY_NOW_MAX_POSITION: f64 = 0.25;
/// Positions at or below this are still below the middle of the range
pub const GOOD_DEAL_MAX_POSITION: f64 = 0.40;
/// Positions at or above this are near the historical high
pub const WAIT_MIN_POSITION: f64 = 0.80;

/// What the buyer should do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    BuyNow,
    GoodDeal,
    Wait,
    Neutral,
}

/// Verdict for the current price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub confidence: Confidence,
    pub reason: String,
}

/// Quick flags for the current price relative to history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAlerts {
    /// Within 10% of the historical low
    pub is_good_deal: bool,
    /// Within 10% of the historical high
    pub is_overpriced: bool,
    /// How far the current price sits above the historical low
    pub savings_potential: f64,
}

/// Normalized placement of `current_price` in `[min, max]`; 0 for a flat range
pub fn price_position(current_price: f64, stats: &SeriesStatistics) -> f64 {
    let span = stats.max - stats.min;
    if span == 0.0 {
        0.0
    } else {
        (current_price - stats.min) / span
    }
}

/// Map price position and recent direction to a verdict; the first matching rule wins
pub fn recommend(
    current_price: f64,
    stats: &SeriesStatistics,
    recent_direction: Direction,
) -> Recommendation {
    let position = price_position(current_price, stats);
    let pct = position * 100.0;

    let (action, confidence, reason) = if position <= BUY_NOW_MAX_POSITION
        && recent_direction != Direction::Increasing
    {
        (
            Action::BuyNow,
            Confidence::High,
            format!("Price is near its historical low ({pct:.0}% of range) and not rising"),
        )
    } else if position <= GOOD_DEAL_MAX_POSITION {
        (
            Action::GoodDeal,
            Confidence::Medium,
            format!("Price is below its historical average ({pct:.0}% of range)"),
        )
    } else if position >= WAIT_MIN_POSITION || recent_direction == Direction::Increasing {
        let why = if position >= WAIT_MIN_POSITION {
            format!("Price is near its historical high ({pct:.0}% of range)")
        } else {
            "Prices have been rising recently".to_string()
        };
        (
            Action::Wait,
            Confidence::High,
            format!("{why}; waiting is likely to pay off"),
        )
    } else {
        (
            Action::Neutral,
            Confidence::Medium,
            format!("Price is in the middle of its historical range ({pct:.0}% of range)"),
        )
    };

    Recommendation {
        action,
        confidence,
        reason,
    }
}

/// Compute the alert flags for `current_price`
pub fn price_alerts(current_price: f64, stats: &SeriesStatistics) -> PriceAlerts {
    PriceAlerts {
        is_good_deal: current_price <= stats.min * 1.1,
        is_overpriced: current_price >= stats.max * 0.9,
        savings_potential: round_cents((current_price - stats.min).max(0.0)),
    }
}

//! Print the history and trend reports for a product as JSON.
//!
//! Usage: `cargo run --example price_report -- "<product name>" [days]`
//!
//! Settings come from the TOML file named by `PRICEWATCH_CONFIG` (optional)
//! and `PRICEWATCH_*` environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use pricewatch::{EngineConfig, ErrorReport, PriceHistoryService};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_target(false).with_env_filter(filter).compact().init();
}

fn main() -> anyhow::Result<()> {
    let config_path = env::var_os("PRICEWATCH_CONFIG").map(PathBuf::from);
    let config = EngineConfig::load(config_path.as_deref()).context("loading configuration")?;
    init_tracing(&config.log_level);

    let mut args = env::args().skip(1);
    let product = args.next().unwrap_or_else(|| "Sony WH-1000XM4 headphones".to_string());
    let days = match args.next() {
        Some(raw) => raw.parse::<i64>().with_context(|| format!("invalid day count `{raw}`"))?,
        None => i64::from(config.default_window_days),
    };

    tracing::info!(product = %product, days, "generating price report");
    let mut service = PriceHistoryService::from_config(config)?;

    match service.get_history(&product, days) {
        Ok(history) => println!("{}", history.to_json()?),
        Err(err) => println!("{}", serde_json::to_string_pretty(&ErrorReport::from(&err))?),
    }

    match service.get_trends(&product) {
        Ok(trends) => println!("{}", trends.to_json()?),
        Err(err) => println!("{}", serde_json::to_string_pretty(&ErrorReport::from(&err))?),
    }

    Ok(())
}

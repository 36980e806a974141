use std::path::Path;
use std::sync::Arc;

use indexboard::{BoardConfig, PriceFeed};

/// Set to run every demo against the offline mock feed.
pub const USE_MOCK_ENV: &str = "INDEXBOARD_DEMOS_USE_MOCK";
/// Optional path to a JSON `BoardConfig`.
pub const CONFIG_ENV: &str = "INDEXBOARD_CONFIG";

/// Whether demos should stay offline.
#[must_use]
pub fn using_mock() -> bool {
    std::env::var_os(USE_MOCK_ENV).is_some()
}

/// Return a price feed for demos.
///
/// # Panics
/// Panics if the Yahoo HTTP client cannot be constructed.
#[must_use]
pub fn get_feed(cfg: &BoardConfig) -> Arc<dyn PriceFeed> {
    if using_mock() {
        println!("--- (Using Mock Feed for CI) ---");
        Arc::new(indexboard_mock::MockFeed::new())
    } else {
        indexboard_yfinance::YfFeed::cached(&cfg.cache())
            .expect("failed to construct the Yahoo Finance client")
            .build()
    }
}

/// Board configuration from `INDEXBOARD_CONFIG`, or the defaults.
///
/// Missing fields in the file fall back to their defaults.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid configuration.
pub fn load_config() -> Result<BoardConfig, Box<dyn std::error::Error>> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => read_config(Path::new(&path)),
        None => Ok(BoardConfig::default()),
    }
}

fn read_config(path: &Path) -> Result<BoardConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

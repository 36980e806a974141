use serde::{Deserialize, Serialize};

/// A market shown on the board.
///
/// Defined once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Display name, e.g. "S&P 500".
    pub name: String,
    /// Price-feed identifier, e.g. "^GSPC".
    pub ticker: String,
    /// Trading-calendar identifier, e.g. "NYSE".
    pub calendar: String,
    /// ISO 3166 alpha-2 country code used for the flag image.
    pub country: String,
}

impl MarketConfig {
    /// Build a market definition.
    pub fn new(
        name: impl Into<String>,
        ticker: impl Into<String>,
        calendar: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
            calendar: calendar.into(),
            country: country.into(),
        }
    }

    /// URL of a 20x15 flag image for the market's country.
    #[must_use]
    pub fn flag_url(&self) -> String {
        format!(
            "https://flagcdn.com/20x15/{}.png",
            self.country.to_ascii_lowercase()
        )
    }
}

/// The default set of world equity indices.
#[must_use]
pub fn world_indices() -> Vec<MarketConfig> {
    [
        ("S&P 500", "^GSPC", "NYSE", "us"),
        ("NASDAQ", "^IXIC", "NASDAQ", "us"),
        ("FTSE 100", "^FTSE", "LSE", "gb"),
        ("DAX", "^GDAXI", "XETR", "de"),
        ("Nikkei 225", "^N225", "JPX", "jp"),
        ("S&P/ASX 200", "^AXJO", "ASX", "au"),
        ("IBOVESPA", "^BVSP", "B3", "br"),
        ("CSI 300", "000300.SS", "SSE", "cn"),
        ("CSI 1000", "000852.SS", "SSE", "cn"),
    ]
    .into_iter()
    .map(|(name, ticker, calendar, country)| MarketConfig::new(name, ticker, calendar, country))
    .collect()
}

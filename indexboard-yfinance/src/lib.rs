//! indexboard-yfinance
//!
//! `PriceFeed` implementation on top of the `yfinance-rs` client library.
//! Downloads raw (unadjusted) close prices at 1m, 5m or 1d granularity and
//! keeps the exchange timezone Yahoo reports for the series.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `yfinance-rs`.
pub mod adapter;
mod builder;

pub use builder::YfFeedBuilder;

use std::sync::Arc;

use adapter::{RealAdapter, YfHistory};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use indexboard_core::{BoardError, Interval, Lookback, PriceFeed, PriceTable};
use paft::market::requests::history::{Interval as YfInterval, Range};
use rust_decimal::prelude::ToPrimitive;
use yfinance_rs as yf;

#[cfg(feature = "test-adapters")]
type HistoryAdapter = Arc<dyn YfHistory>;
#[cfg(not(feature = "test-adapters"))]
type HistoryAdapter = Arc<RealAdapter>;

/// Yahoo Finance price feed. Production users construct it with
/// [`YfFeed::try_new_default`] or wrap it in a cache with [`YfFeed::cached`].
pub struct YfFeed {
    history: HistoryAdapter,
}

impl YfFeed {
    /// Provider name used in errors and cache keys.
    pub const NAME: &'static str = "indexboard-yfinance";

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found")
            || m.contains("no data")
            || m.contains("no matches")
            || m.contains("delisted")
    }

    fn normalize_error(e: BoardError, what: &str) -> BoardError {
        match e {
            BoardError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    BoardError::not_found(what.to_string())
                } else {
                    BoardError::connector(Self::NAME, msg)
                }
            }
            BoardError::Other(msg) => BoardError::connector(Self::NAME, msg),
            other => other,
        }
    }

    /// Build with a fresh `yfinance_rs::YfClient` inside.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_new_default() -> Result<Self, BoardError> {
        let a = RealAdapter::try_new_default()?;
        Ok(Self::from_real(a))
    }

    /// Build from an existing `yfinance_rs::YfClient`.
    #[must_use]
    pub fn new_with_client(client: yfinance_rs::YfClient) -> Self {
        Self::from_real(RealAdapter::new(client))
    }

    /// Build from a provided `reqwest::Client`.
    ///
    /// The provided client should enable a cookie store for the Yahoo crumb flow.
    ///
    /// # Errors
    /// Returns an error if the internal `YfClient` cannot be constructed.
    pub fn try_new_with_reqwest_client(http: reqwest::Client) -> Result<Self, BoardError> {
        let a = RealAdapter::try_with_reqwest_client(http)?;
        Ok(Self::from_real(a))
    }

    fn from_real(adapter: RealAdapter) -> Self {
        Self {
            history: Arc::new(adapter),
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_adapter(history: Arc<dyn YfHistory>) -> Self {
        Self { history }
    }

    /// Provider request for `interval` over the trailing `lookback`, ending at `now`.
    ///
    /// One and five day windows use Yahoo's named ranges; the seven day window is
    /// sent as an explicit period since Yahoo has no named range for it.
    #[must_use]
    pub fn history_request(
        interval: Interval,
        lookback: Lookback,
        now: DateTime<Utc>,
    ) -> yf::core::services::HistoryRequest {
        let (range, period) = match lookback {
            Lookback::OneDay => (Some(Range::D1), None),
            Lookback::FiveDays => (Some(Range::D5), None),
            Lookback::SevenDays => {
                let start = now - TimeDelta::days(lookback.days());
                (None, Some((start.timestamp(), now.timestamp())))
            }
        };
        yf::core::services::HistoryRequest {
            range,
            period,
            interval: match interval {
                Interval::OneMinute => YfInterval::I1m,
                Interval::FiveMinutes => YfInterval::I5m,
                Interval::OneDay => YfInterval::D1,
            },
            include_prepost: false,
            include_actions: false,
            auto_adjust: false,
            keepna: false,
        }
    }

    /// Single-column table of raw closes, carrying the reported exchange timezone.
    fn to_table(resp: yf::HistoryResponse) -> PriceTable {
        let tz = resp.meta.as_ref().and_then(|m| m.timezone);
        PriceTable::from_closes(
            tz,
            resp.candles
                .into_iter()
                .map(|c| (c.ts, c.close.amount().to_f64())),
        )
    }
}

#[async_trait]
impl PriceFeed for YfFeed {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "indexboard::yfinance",
            skip_all,
            fields(ticker = %ticker, interval = %interval, lookback = %lookback),
        )
    )]
    async fn download(
        &self,
        ticker: &str,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<PriceTable, BoardError> {
        let req = Self::history_request(interval, lookback, Utc::now());
        let raw = self
            .history
            .fetch_full(ticker, req)
            .await
            .map_err(|e| {
                Self::normalize_error(e, &format!("{interval} history for {ticker}"))
            })?;
        Ok(Self::to_table(raw))
    }
}

//! indexboard-mock
//!
//! Deterministic stand-ins for the network-facing pieces of the board:
//! a fixture-backed `PriceFeed`, a scriptable feed driven by a controller, and
//! calendars with explicit sessions.

use std::sync::Arc;

use async_trait::async_trait;
use indexboard_core::{BoardError, Clock, Interval, Lookback, PriceFeed, PriceTable, SystemClock};

mod calendars;
mod dynamic;
mod fixtures;

pub use calendars::{MockCalendar, MockCalendars};
pub use dynamic::{DynamicMockController, DynamicMockFeed, MockBehavior};

/// Mock feed for CI-safe demos. Serves synthetic data relative to its clock.
///
/// | ticker        | intraday | daily                      |
/// |---------------|----------|----------------------------|
/// | `^GSPC`, `^GDAXI`, `^AXJO`, `000300.SS` | 1m, 5m | yes |
/// | `^IXIC`, `^BVSP` | 5m only | yes                     |
/// | `^FTSE`       | none     | yes                        |
/// | `^N225`       | none     | five-day window only       |
/// | `000852.SS`   | none     | none                       |
/// | `FAIL`        | error    | error                      |
///
/// Any other ticker is `NotFound`.
pub struct MockFeed {
    clock: Arc<dyn Clock>,
}

impl Default for MockFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFeed {
    /// Feed timed by the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Feed timed by `clock`, so fixtures line up with a test's "today".
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl PriceFeed for MockFeed {
    fn name(&self) -> &'static str {
        "indexboard-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn download(
        &self,
        ticker: &str,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<PriceTable, BoardError> {
        if ticker == "FAIL" {
            return Err(BoardError::connector(
                "indexboard-mock",
                format!("forced failure: download/{interval}"),
            ));
        }
        let fixture = fixtures::prices::by_ticker(ticker)
            .ok_or_else(|| BoardError::not_found(format!("{interval} history for {ticker}")))?;
        Ok(fixture.table(interval, lookback, self.clock.now()))
    }
}

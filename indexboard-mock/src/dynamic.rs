use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use indexboard_core::{BoardError, Interval, Lookback, PriceFeed, PriceTable};

/// Instruction for how a download should behave for a given request.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(BoardError),
}

type RequestKey = (String, Interval, Lookback);

#[derive(Default)]
struct InternalState {
    rules: HashMap<RequestKey, MockBehavior<PriceTable>>,
    calls: Vec<RequestKey>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for downloads of `ticker` at `interval` over `lookback`.
    pub async fn set_behavior(
        &self,
        ticker: &str,
        interval: Interval,
        lookback: Lookback,
        behavior: MockBehavior<PriceTable>,
    ) {
        let mut guard = self.state.lock().await;
        guard
            .rules
            .insert((ticker.to_string(), interval, lookback), behavior);
    }

    /// Shortcut for `set_behavior(.., MockBehavior::Return(table))`.
    pub async fn set_table(
        &self,
        ticker: &str,
        interval: Interval,
        lookback: Lookback,
        table: PriceTable,
    ) {
        self.set_behavior(ticker, interval, lookback, MockBehavior::Return(table))
            .await;
    }

    /// Every request received so far, in call order.
    pub async fn calls(&self) -> Vec<(String, Interval, Lookback)> {
        self.state.lock().await.calls.clone()
    }

    /// Number of requests received so far.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Clear all behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.calls.clear();
    }
}

/// A feed that defers all behavior to an external controller.
///
/// Requests without a configured behavior fail with `NotFound`.
pub struct DynamicMockFeed {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockFeed {
    /// Create a new dynamic mock feed and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn PriceFeed>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn PriceFeed>, controller)
    }
}

#[async_trait]
impl PriceFeed for DynamicMockFeed {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    async fn download(
        &self,
        ticker: &str,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<PriceTable, BoardError> {
        let key = (ticker.to_string(), interval, lookback);
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(key.clone());
            guard.rules.get(&key).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(table)) => Ok(table),
            Some(MockBehavior::Fail(e)) => Err(e),
            None => Err(BoardError::not_found(format!(
                "{interval} history for {ticker}"
            ))),
        }
    }
}

#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;

use indexboard_core::BoardError;
use yf::core::HistoryService;
use yfinance_rs as yf;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// History abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YfHistory: Send + Sync {
    /// Fetch full history for a symbol using a provider-specific request.
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, BoardError>;
}

/// Real adapter backed by a single `YfClient` instance.
/// `YfClient` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    client: yf::YfClient,
}

impl RealAdapter {
    /// Build a default `YfClient` with a browser user agent.
    ///
    /// # Errors
    /// Returns `BoardError::Other` if the HTTP client or the `YfClient` cannot
    /// be constructed.
    pub fn try_new_default() -> Result<Self, BoardError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .no_proxy()
            .build()
            .map_err(|e| BoardError::Other(format!("http client: {e}")))?;
        Self::try_with_reqwest_client(http)
    }

    /// Build from a provided `reqwest::Client`.
    ///
    /// The client should enable a cookie store for the Yahoo crumb flow.
    ///
    /// # Errors
    /// Returns `BoardError::Other` if the `YfClient` cannot be constructed.
    pub fn try_with_reqwest_client(http: reqwest::Client) -> Result<Self, BoardError> {
        let client = yf::YfClient::builder()
            .custom_client(http)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BoardError::Other(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `YfClient`.
    #[must_use]
    pub const fn new(client: yf::YfClient) -> Self {
        Self { client }
    }
}

fn map_yf_err(e: &yf::YfError, context: &str) -> BoardError {
    match e {
        yf::YfError::NotFound { .. } => BoardError::not_found(context.to_string()),
        yf::YfError::RateLimited { .. } => {
            BoardError::connector("indexboard-yfinance", format!("rate limit: {context}"))
        }
        yf::YfError::ServerError { status, .. } => BoardError::connector(
            "indexboard-yfinance",
            format!("server error {status}: {context}"),
        ),
        yf::YfError::Status { status, .. } => {
            BoardError::connector("indexboard-yfinance", format!("status {status}: {context}"))
        }
        other => BoardError::connector("indexboard-yfinance", other.to_string()),
    }
}

#[async_trait]
impl YfHistory for RealAdapter {
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, BoardError> {
        self.client
            .fetch_full_history(symbol, req)
            .await
            .map_err(|e| map_yf_err(&e, &format!("history for {symbol}")))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfHistory {
    /// Build a `YfHistory` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfHistory>
    where
        F: Send
            + Sync
            + 'static
            + Fn(
                String,
                yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, BoardError>,
    {
        struct FnHist<F>(F);
        #[async_trait]
        impl<F> YfHistory for FnHist<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(
                    String,
                    yf::core::services::HistoryRequest,
                ) -> Result<yf::HistoryResponse, BoardError>,
        {
            async fn fetch_full(
                &self,
                symbol: &str,
                req: yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, BoardError> {
                (self.0)(symbol.to_string(), req)
            }
        }
        Arc::new(FnHist(f))
    }
}

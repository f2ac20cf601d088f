use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::coin::Coin;

/// Current price snapshot, computed server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceStats {
    pub price: f64,
    #[serde(rename = "change24h")]
    pub change_24h: f64,
    #[serde(rename = "marketCap")]
    pub market_cap: f64,
}

/// Server-computed deviation metrics over recent price data.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviationStats {
    pub deviation: f64,
    pub mean: f64,
    pub variance: f64,
}

/// Raw price history: `[timestamp_millis, price]` samples in backend order.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<(i64, f64)>,
}

#[async_trait]
pub trait AnalyticsProvider: Send + Sync {
    async fn fetch_stats(&self, coin: Coin) -> Result<PriceStats>;
    async fn fetch_deviation(&self, coin: Coin) -> Result<DeviationStats>;
    async fn fetch_market_chart(&self, coin: Coin, days: u32) -> Result<MarketChart>;
}

/// Error body the backend may attach to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: Option<String>,
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("cryptodash/0.1")
            .build()?;
        Ok(ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Issues one GET and collapses every failure mode into a single
    /// human-readable message: a server-supplied `error` field when present,
    /// else the per-operation fallback. No retries.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        fallback: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Requesting {url}");

        let response = match self.http.get(&url).query(query).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Transport error for {url}: {e}");
                return Err(anyhow!("{fallback}"));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| fallback.to_string());
            debug!("HTTP {status} from {url}: {message}");
            return Err(anyhow!(message));
        }

        match response.json::<T>().await {
            Ok(payload) => Ok(payload),
            Err(e) => {
                debug!("Malformed response from {url}: {e}");
                Err(anyhow!("{fallback}"))
            }
        }
    }
}

#[async_trait]
impl AnalyticsProvider for ApiClient {
    #[instrument(name = "StatsFetch", skip(self), fields(coin = %coin))]
    async fn fetch_stats(&self, coin: Coin) -> Result<PriceStats> {
        self.get_json(
            "/api/crypto/stats",
            &[("coin", coin.id().to_string())],
            "Failed to fetch crypto stats",
        )
        .await
    }

    #[instrument(name = "DeviationFetch", skip(self), fields(coin = %coin))]
    async fn fetch_deviation(&self, coin: Coin) -> Result<DeviationStats> {
        self.get_json(
            "/api/crypto/deviation",
            &[("coin", coin.id().to_string())],
            "Failed to fetch deviation data",
        )
        .await
    }

    #[instrument(name = "MarketChartFetch", skip(self), fields(coin = %coin))]
    async fn fetch_market_chart(&self, coin: Coin, days: u32) -> Result<MarketChart> {
        self.get_json(
            "/api/crypto/market-chart",
            &[("coin", coin.id().to_string()), ("days", days.to_string())],
            "Failed to fetch market chart data",
        )
        .await
    }
}

//! HTTP client for the analytics backend.

use std::time::Duration;

use reqwest::Client;

use crate::error::{Error, Result};
use crate::types::{AnalysisResponse, CypherSignal, LevelReport, PatternReport};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("pulse/", env!("CARGO_PKG_VERSION"));

/// Client for the dashboard's analytics API.
///
/// All endpoints are read-only GETs. There is no internal retry; a failed
/// request surfaces as an [`Error`] and the caller decides what to do
/// (the multi-timeframe aggregator, for instance, degrades that timeframe
/// to "unavailable").
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create a new client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the server-side analysis for one symbol and interval.
    pub async fn analysis(&self, symbol: &str, interval: &str) -> Result<AnalysisResponse> {
        self.get_json("analysis", symbol, interval).await
    }

    /// Fetch detected chart patterns for one symbol and interval.
    pub async fn patterns(&self, symbol: &str, interval: &str) -> Result<PatternReport> {
        self.get_json("patterns", symbol, interval).await
    }

    /// Fetch support/resistance levels for one symbol and interval.
    pub async fn levels(&self, symbol: &str, interval: &str) -> Result<LevelReport> {
        self.get_json("levels", symbol, interval).await
    }

    /// Fetch the composite Cypher Method signal for one symbol.
    ///
    /// Unlike the other endpoints the backend picks the timeframes itself,
    /// so no interval is sent.
    pub async fn cypher(&self, symbol: &str) -> Result<CypherSignal> {
        if symbol.is_empty() {
            return Err(Error::InvalidParameter("symbol must not be empty".into()));
        }

        let url = format!("{}/api/cypher/{}", self.base_url, symbol.to_uppercase());
        self.fetch_json(&url, "cypher").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        symbol: &str,
        interval: &str,
    ) -> Result<T> {
        if symbol.is_empty() {
            return Err(Error::InvalidParameter("symbol must not be empty".into()));
        }

        let url = format!(
            "{}/api/{}/{}?interval={}",
            self.base_url,
            endpoint,
            symbol.to_uppercase(),
            interval
        );
        self.fetch_json(&url, endpoint).await
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        endpoint: &str,
    ) -> Result<T> {
        tracing::debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("failed to parse {endpoint} response: {body}");
            Error::Json(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = AnalysisClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_empty_symbol_rejected() {
        let client = AnalysisClient::new("http://localhost:8000").unwrap();
        let err = client.analysis("", "1h").await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));

        let err = client.cypher("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}

//! HTTP client for the exchange's public market-data API.

use std::time::Duration;

use anyhow::Context;
use pulse_core::{Candle, Timeframe};
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;

use crate::types::{ExchangeInfo, Kline, Ticker24h};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("pulse/", env!("CARGO_PKG_VERSION"));

/// Client for public (unauthenticated) market-data endpoints.
#[derive(Debug, Clone)]
pub struct MarketClient {
    http: Client,
    base_url: String,
}

impl MarketClient {
    /// Create a new client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch recent klines and convert them to candles.
    ///
    /// Open times arrive in milliseconds and are converted to unix seconds;
    /// the result is sorted ascending by time.
    pub async fn klines(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> anyhow::Result<Vec<Candle>> {
        let url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base_url,
            symbol.to_uppercase(),
            timeframe.label(),
            limit
        );

        let klines: Vec<Kline> = self
            .get_json(&url)
            .await
            .with_context(|| format!("failed to fetch {symbol} {timeframe} klines"))?;

        let mut candles: Vec<Candle> = klines.iter().map(kline_to_candle).collect();
        candles.sort_by_key(|c| c.time);

        log::debug!("loaded {} {symbol} {timeframe} candles", candles.len());
        Ok(candles)
    }

    /// Fetch 24h statistics for one symbol.
    pub async fn ticker_24h(&self, symbol: &str) -> anyhow::Result<Ticker24h> {
        let url = format!(
            "{}/api/v3/ticker/24hr?symbol={}",
            self.base_url,
            symbol.to_uppercase()
        );
        self.get_json(&url)
            .await
            .with_context(|| format!("failed to fetch 24h ticker for {symbol}"))
    }

    /// The `count` USDT pairs with the highest 24h quote volume.
    pub async fn top_usdt_tickers(&self, count: usize) -> anyhow::Result<Vec<Ticker24h>> {
        let url = format!("{}/api/v3/ticker/24hr", self.base_url);
        let mut tickers: Vec<Ticker24h> = self
            .get_json(&url)
            .await
            .context("failed to fetch 24h tickers")?;

        tickers.retain(|t| t.symbol.ends_with("USDT"));
        tickers.sort_by(|a, b| b.quote_volume.0.cmp(&a.quote_volume.0));
        tickers.truncate(count);
        Ok(tickers)
    }

    /// All symbols currently open for trading.
    pub async fn symbols(&self) -> anyhow::Result<Vec<String>> {
        let url = format!("{}/api/v3/exchangeInfo", self.base_url);
        let info: ExchangeInfo = self
            .get_json(&url)
            .await
            .context("failed to fetch exchange info")?;

        Ok(info
            .symbols
            .into_iter()
            .filter(|s| s.status == "TRADING")
            .map(|s| s.symbol)
            .collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        log::debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("exchange returned HTTP {status}: {body}");
        }

        Ok(response.json().await?)
    }
}

/// Convert a wire kline to a candle.
fn kline_to_candle(kline: &Kline) -> Candle {
    Candle::new(
        kline.open_time / 1000, // ms → seconds
        kline.open.0.to_f64().unwrap_or(0.0),
        kline.high.0.to_f64().unwrap_or(0.0),
        kline.low.0.to_f64().unwrap_or(0.0),
        kline.close.0.to_f64().unwrap_or(0.0),
        kline.volume.0.to_f64().unwrap_or(0.0),
    )
}

//! Data source trait definition.

use async_trait::async_trait;
use pulse_core::{aggregate_candles, Candle, Timeframe};

use crate::client::MarketClient;

/// Trait for types that can load candle data.
///
/// This trait uses `anyhow::Result` for flexible error handling.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn load(&self) -> anyhow::Result<Vec<Candle>>;
}

/// Loads one symbol/timeframe pair over the exchange's REST API.
pub struct RestSource {
    client: MarketClient,
    symbol: String,
    timeframe: Timeframe,
    limit: usize,
    base: Option<Timeframe>,
}

impl RestSource {
    pub fn new(
        client: MarketClient,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Self {
        Self {
            client,
            symbol: symbol.to_uppercase(),
            timeframe,
            limit,
            base: None,
        }
    }

    /// Fetch finer `base` candles and roll them up to this source's
    /// timeframe client-side. For mirrors that don't serve every interval.
    pub fn derived_from(mut self, base: Timeframe) -> Self {
        self.base = Some(base);
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    fn finalize(&self, candles: Vec<Candle>) -> Vec<Candle> {
        match self.base {
            Some(_) => aggregate_candles(&candles, self.timeframe),
            None => candles,
        }
    }
}

#[async_trait]
impl DataSource for RestSource {
    async fn load(&self) -> anyhow::Result<Vec<Candle>> {
        let fetch_timeframe = self.base.unwrap_or(self.timeframe);
        let candles = self
            .client
            .klines(&self.symbol, fetch_timeframe, self.limit)
            .await?;
        Ok(self.finalize(candles))
    }
}

//! Concurrent multi-timeframe analysis aggregation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::future::join_all;
use pulse_core::Timeframe;

use crate::client::AnalysisClient;
use crate::error::Result;
use crate::types::{AnalysisResponse, IndicatorSnapshot};

/// Fetch seam for the aggregator so it can be exercised without a network.
#[async_trait]
pub trait AnalysisFetch: Send + Sync {
    async fn analysis(&self, symbol: &str, interval: &str) -> Result<AnalysisResponse>;
}

#[async_trait]
impl AnalysisFetch for AnalysisClient {
    async fn analysis(&self, symbol: &str, interval: &str) -> Result<AnalysisResponse> {
        AnalysisClient::analysis(self, symbol, interval).await
    }
}

/// One merged row of the multi-timeframe table.
#[derive(Debug, Clone)]
pub struct TimeframeAnalysis {
    pub timeframe: String,
    pub trend: Option<String>,
    pub indicators: Option<IndicatorSnapshot>,
    pub summary: Option<String>,
}

impl TimeframeAnalysis {
    fn from_response(timeframe: Timeframe, response: AnalysisResponse) -> Self {
        let analysis = response.analysis;
        Self {
            timeframe: timeframe.label().to_string(),
            trend: analysis.as_ref().and_then(|a| a.trend.clone()),
            summary: analysis
                .as_ref()
                .and_then(|a| a.analysis.as_ref())
                .and_then(|text| text.summary.clone()),
            indicators: analysis.and_then(|a| a.indicators),
        }
    }
}

/// Fetch the analysis for every requested timeframe concurrently.
///
/// One fetch is issued per timeframe; a failure degrades that timeframe to
/// `None` without affecting its siblings. The result always has exactly
/// one entry per requested timeframe, keyed by label.
pub async fn aggregate<F: AnalysisFetch>(
    fetcher: &F,
    symbol: &str,
    timeframes: &[Timeframe],
) -> BTreeMap<String, Option<TimeframeAnalysis>> {
    let fetches = timeframes.iter().map(|&timeframe| async move {
        let result = fetcher.analysis(symbol, timeframe.label()).await;
        let row = match result {
            Ok(response) => Some(TimeframeAnalysis::from_response(timeframe, response)),
            Err(err) => {
                tracing::warn!("analysis for {symbol} {timeframe} failed: {err}");
                None
            }
        };
        (timeframe.label().to_string(), row)
    });

    join_all(fetches).await.into_iter().collect()
}

//! Client for the analytics backend.
//!
//! Wraps the dashboard's HTTP analytics API (per-timeframe analysis,
//! chart patterns, key levels) and provides the multi-timeframe fan-out
//! that tolerates individual timeframe failures.

pub mod client;
pub mod error;
pub mod multi_timeframe;
pub mod types;

pub use client::AnalysisClient;
pub use error::{Error, Result};
pub use multi_timeframe::{aggregate, AnalysisFetch, TimeframeAnalysis};
pub use types::{
    Analysis, AnalysisResponse, AnalysisText, BollingerSnapshot, CypherFrame, CypherSignal,
    EmaSnapshot, IndicatorSnapshot, LevelInfo, LevelReport, MacdSnapshot, PatternInfo,
    PatternReport, RsiSnapshot, SommiFlags, Suggestion,
};

//! Wire types for the analytics backend's JSON responses.
//!
//! The backend computes everything server-side; these types consume its
//! payloads as-is. Fields the backend may omit are `Option`s rather than
//! hard requirements so a partial response still deserializes.

use serde::Deserialize;

/// Top-level response of `GET /api/analysis/{symbol}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: Option<Analysis>,
    pub suggestion: Option<Suggestion>,
}

/// Per-timeframe market analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct Analysis {
    pub trend: Option<String>,
    pub indicators: Option<IndicatorSnapshot>,
    pub analysis: Option<AnalysisText>,
}

/// Server-computed indicator values at the latest candle.
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<RsiSnapshot>,
    pub macd: Option<MacdSnapshot>,
    pub ema: Option<EmaSnapshot>,
    pub bollinger_bands: Option<BollingerSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RsiSnapshot {
    pub value: Option<f64>,
    pub analysis: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MacdSnapshot {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub analysis: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmaSnapshot {
    pub ema21: Option<f64>,
    pub ema50: Option<f64>,
    pub ema200: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BollingerSnapshot {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
    pub analysis: Option<String>,
}

/// Free-text commentary per indicator.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisText {
    pub summary: Option<String>,
    pub rsi: Option<String>,
    pub macd: Option<String>,
    pub bollinger: Option<String>,
}

/// Trade suggestion attached to an analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub entry: Option<f64>,
    #[serde(rename = "stopLoss")]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub targets: Vec<f64>,
    pub confidence: Option<f64>,
    pub risk: Option<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Response of `GET /api/patterns/{symbol}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternReport {
    #[serde(default)]
    pub patterns: Vec<PatternInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatternInfo {
    pub name: String,
    pub direction: Option<String>,
    pub time: Option<i64>,
    pub confidence: Option<f64>,
}

/// Response of `GET /api/levels/{symbol}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelReport {
    #[serde(default)]
    pub levels: Vec<LevelInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelInfo {
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub strength: Option<f64>,
}

/// Response of `GET /api/cypher/{symbol}`: the backend's composite
/// LONG/SHORT/NEUTRAL signal built from 4h and 2h oscillator readings.
#[derive(Debug, Clone, Deserialize)]
pub struct CypherSignal {
    pub direction: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "timeframeUsed")]
    pub timeframe_used: Option<String>,
    #[serde(rename = "frame4h")]
    pub frame_4h: Option<CypherFrame>,
    #[serde(default)]
    pub reasons: Vec<String>,
    pub sommi: Option<SommiFlags>,
}

/// Oscillator readings for one of the signal's timeframes.
#[derive(Debug, Clone, Deserialize)]
pub struct CypherFrame {
    pub mfi: Option<f64>,
    pub rsi: Option<f64>,
    pub wt1: Option<f64>,
    pub wt2: Option<f64>,
    #[serde(rename = "stochK")]
    pub stoch_k: Option<f64>,
    #[serde(rename = "stochD")]
    pub stoch_d: Option<f64>,
    pub stc: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SommiFlags {
    #[serde(rename = "bullFlag")]
    pub bull_flag: Option<bool>,
    #[serde(rename = "bearFlag")]
    pub bear_flag: Option<bool>,
}

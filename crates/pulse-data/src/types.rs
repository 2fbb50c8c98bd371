//! Wire types for the exchange's public market-data endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Decimal wrapper that deserializes from a JSON string (`"64231.50"`)
/// or, for lenient mirrors, a raw number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct StringDecimal(pub Decimal);

impl<'de> Deserialize<'de> for StringDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrNumber {
            String(String),
            Number(f64),
        }

        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(s) => s
                .parse::<Decimal>()
                .map(StringDecimal)
                .map_err(|e| D::Error::custom(format!("invalid decimal: {e}"))),
            StringOrNumber::Number(n) => Decimal::try_from(n)
                .map(StringDecimal)
                .map_err(|e| D::Error::custom(format!("invalid decimal: {e}"))),
        }
    }
}

impl std::fmt::Display for StringDecimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kline/candlestick data.
#[derive(Debug, Clone)]
pub struct Kline {
    /// Open time in milliseconds.
    pub open_time: i64,
    pub open: StringDecimal,
    pub high: StringDecimal,
    pub low: StringDecimal,
    pub close: StringDecimal,
    pub volume: StringDecimal,
    /// Close time in milliseconds.
    pub close_time: i64,
    pub quote_volume: StringDecimal,
    pub trades: i64,
}

// Custom deserializer for Kline since it comes as an array
impl<'de> Deserialize<'de> for Kline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let arr: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;

        if arr.len() < 9 {
            return Err(D::Error::custom("kline array too short"));
        }

        let parse_decimal = |v: &serde_json::Value| -> Result<StringDecimal, D::Error> {
            match v {
                serde_json::Value::String(s) => s
                    .parse::<Decimal>()
                    .map(StringDecimal)
                    .map_err(|e| D::Error::custom(format!("invalid decimal: {e}"))),
                serde_json::Value::Number(n) => n
                    .as_f64()
                    .ok_or_else(|| D::Error::custom("invalid number"))
                    .and_then(|f| {
                        Decimal::try_from(f)
                            .map(StringDecimal)
                            .map_err(|e| D::Error::custom(format!("invalid decimal: {e}")))
                    }),
                _ => Err(D::Error::custom("expected string or number")),
            }
        };

        let parse_i64 = |v: &serde_json::Value| -> Result<i64, D::Error> {
            v.as_i64()
                .ok_or_else(|| D::Error::custom("expected integer"))
        };

        Ok(Kline {
            open_time: parse_i64(&arr[0])?,
            open: parse_decimal(&arr[1])?,
            high: parse_decimal(&arr[2])?,
            low: parse_decimal(&arr[3])?,
            close: parse_decimal(&arr[4])?,
            volume: parse_decimal(&arr[5])?,
            close_time: parse_i64(&arr[6])?,
            quote_volume: parse_decimal(&arr[7])?,
            trades: parse_i64(&arr[8])?,
        })
    }
}

/// 24hr ticker statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    pub last_price: StringDecimal,
    pub price_change_percent: StringDecimal,
    pub high_price: StringDecimal,
    pub low_price: StringDecimal,
    pub volume: StringDecimal,
    pub quote_volume: StringDecimal,
}

/// Exchange information response.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

/// Symbol trading information.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: String,
    pub quote_asset: String,
}

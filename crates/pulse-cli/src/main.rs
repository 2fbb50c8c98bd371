//! Terminal summary view: loads candles, prints the latest indicator
//! values and the multi-timeframe analysis table.

use anyhow::Context;
use pulse_analysis::{aggregate, AnalysisClient};
use pulse_config::Config;
use pulse_core::{CandleStore, Timeframe};
use pulse_data::{DataSource, MarketClient, RestSource};
use pulse_indicators::{bollinger, ema, macd, rsi, BollingerConfig, MacdConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::load_default();

    // Usage: pulse [SYMBOL] [TIMEFRAME]
    let mut args = std::env::args().skip(1);
    let symbol = args
        .next()
        .unwrap_or_else(|| config.general.default_symbol.clone());
    let timeframe: Timeframe = args
        .next()
        .unwrap_or_else(|| config.general.default_timeframe.clone())
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let market = MarketClient::new(&config.api.market_url)?;
    let source = RestSource::new(market, &symbol, timeframe, 500);
    let mut store = CandleStore::new(source.symbol(), timeframe);
    let ticket = store.begin_switch(source.symbol(), timeframe);
    let candles = source.load().await.context("failed to load candles")?;
    // No other switch is in flight, so the ticket cannot be stale.
    let published = store.publish(ticket, candles);
    debug_assert!(published);

    print_snapshot(&store, &config);

    let analysis = AnalysisClient::new(&config.api.analysis_url)
        .map_err(|e| anyhow::anyhow!("failed to build analytics client: {e}"))?;

    match analysis.levels(store.symbol(), timeframe.label()).await {
        Ok(report) if !report.levels.is_empty() => {
            println!();
            println!("Key levels:");
            for level in &report.levels {
                println!(
                    "  {:<10} {:.2}",
                    level.kind.as_deref().unwrap_or("level"),
                    level.price
                );
            }
        }
        Ok(_) => {}
        Err(e) => log::warn!("key levels unavailable: {e}"),
    }

    match analysis.patterns(store.symbol(), timeframe.label()).await {
        Ok(report) if !report.patterns.is_empty() => {
            println!();
            println!("Patterns:");
            for pattern in &report.patterns {
                println!(
                    "  {} ({})",
                    pattern.name,
                    pattern.direction.as_deref().unwrap_or("neutral")
                );
            }
        }
        Ok(_) => {}
        Err(e) => log::warn!("patterns unavailable: {e}"),
    }

    match analysis.cypher(store.symbol()).await {
        Ok(signal) => {
            println!();
            println!(
                "Cypher signal: {}",
                signal.direction.as_deref().unwrap_or("NEUTRAL")
            );
            if let Some(message) = &signal.message {
                println!("  {message}");
            }
            for reason in &signal.reasons {
                println!("  - {reason}");
            }
        }
        Err(e) => log::warn!("cypher signal unavailable: {e}"),
    }

    let timeframes: Vec<Timeframe> = config
        .multi_timeframe
        .timeframes
        .iter()
        .filter_map(|label| match label.parse() {
            Ok(tf) => Some(tf),
            Err(e) => {
                log::warn!("skipping configured timeframe: {e}");
                None
            }
        })
        .collect();

    let table = aggregate(&analysis, store.symbol(), &timeframes).await;

    println!();
    println!("Multi-timeframe summary for {}:", store.symbol());
    for tf in &timeframes {
        match table.get(tf.label()).and_then(|row| row.as_ref()) {
            Some(row) => println!(
                "  {:>3}  {:<10} {}",
                row.timeframe,
                row.trend.as_deref().unwrap_or("-"),
                row.summary.as_deref().unwrap_or("")
            ),
            None => println!("  {:>3}  unavailable", tf.label()),
        }
    }

    Ok(())
}

/// Print the latest value of each configured indicator.
fn print_snapshot(store: &CandleStore, config: &Config) {
    let candles = store.candles();
    let params = &config.indicators;

    println!(
        "{} {} ({} candles)",
        store.symbol(),
        store.timeframe(),
        candles.len()
    );

    if let Some(last) = candles.last() {
        println!("  close      {:.2}", last.close);
    }
    for period in [params.ema_fast, params.ema_mid, params.ema_slow] {
        if let Some(point) = ema(candles, period).last() {
            println!("  ema{:<3}     {:.2}", period, point.value);
        }
    }
    if let Some(point) = rsi(candles, params.rsi_length).last() {
        println!("  rsi{:<3}     {:.1}", params.rsi_length, point.value);
    }
    if let Some(point) = macd(candles, MacdConfig::default()).last() {
        println!(
            "  macd       {:.2} / signal {:.2} / hist {:.2}",
            point.macd, point.signal, point.histogram
        );
    }
    let bb_config = BollingerConfig {
        period: params.bollinger_period,
        multiplier: params.bollinger_multiplier,
    };
    if let Some(point) = bollinger(candles, bb_config).last() {
        println!(
            "  bollinger  {:.2} / {:.2} / {:.2}",
            point.upper, point.middle, point.lower
        );
    }
}

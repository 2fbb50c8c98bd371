//! Generation-tracked owner of the current candle set.
//!
//! The store holds the candles for exactly one (symbol, timeframe) pair.
//! Switching selection hands out a `LoadTicket`; only the ticket from the
//! most recent switch may publish candles, so a slow fetch resolving after
//! a newer selection is discarded instead of overwriting newer state.

use crate::candle::Candle;
use crate::timeframe::Timeframe;

/// Ticket returned by [`CandleStore::begin_switch`]. Redeemed on publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Single source of truth for the candle sequence all indicators read from.
///
/// The published slice is replaced wholesale and never mutated in place.
#[derive(Debug)]
pub struct CandleStore {
    symbol: String,
    timeframe: Timeframe,
    candles: Vec<Candle>,
    generation: u64,
}

impl CandleStore {
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            timeframe,
            candles: Vec::new(),
            generation: 0,
        }
    }

    /// Start switching to a new (symbol, timeframe) selection.
    ///
    /// Bumps the generation so any fetch still in flight for the previous
    /// selection can no longer publish. The old candles stay visible until
    /// the new ones arrive.
    pub fn begin_switch(&mut self, symbol: &str, timeframe: Timeframe) -> LoadTicket {
        self.symbol = symbol.to_uppercase();
        self.timeframe = timeframe;
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Publish fetched candles for the given ticket.
    ///
    /// Returns `false` and leaves the store untouched when the ticket is
    /// stale (a newer switch happened while the fetch was in flight).
    pub fn publish(&mut self, ticket: LoadTicket, candles: Vec<Candle>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.candles = candles;
        true
    }

    /// The current candle sequence, ascending by time.
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Monotonic counter bumped on every selection switch. Consumers cache
    /// this to detect that the candle set they derived from is gone.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

//! OHLCV candles and the rolling window the indicators read from.

use crate::{Price, Size};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single OHLCV sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Size,
    /// Start of the candle interval.
    pub opened_at: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Size,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            opened_at,
        }
    }
}

/// Fixed-capacity rolling window of candles.
///
/// Ring-buffer semantics: appending beyond capacity evicts the oldest
/// sample. The feed owns and appends; the strategy only reads a
/// snapshot per tick.
#[derive(Debug, Clone)]
pub struct CandleWindow {
    candles: VecDeque<Candle>,
    capacity: usize,
}

impl CandleWindow {
    /// Create an empty window holding at most `capacity` candles.
    pub fn new(capacity: usize) -> Self {
        Self {
            candles: VecDeque::with_capacity(capacity.min(4096)),
            capacity: capacity.max(1),
        }
    }

    /// Append a candle, evicting the oldest if at capacity.
    pub fn push(&mut self, candle: Candle) {
        while self.candles.len() >= self.capacity {
            self.candles.pop_front();
        }
        self.candles.push_back(candle);
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent candle, if any.
    pub fn latest(&self) -> Option<&Candle> {
        self.candles.back()
    }

    /// Snapshot of the most recent `n` candles in chronological order.
    ///
    /// Returns fewer than `n` when the window holds less history.
    pub fn tail(&self, n: usize) -> Vec<Candle> {
        let skip = self.candles.len().saturating_sub(n);
        self.candles.iter().skip(skip).cloned().collect()
    }

    /// Snapshot of the full window in chronological order.
    pub fn to_vec(&self) -> Vec<Candle> {
        self.candles.iter().cloned().collect()
    }
}

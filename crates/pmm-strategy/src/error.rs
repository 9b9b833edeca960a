//! Error types for the strategy crate.

use pmm_core::Price;
use rust_decimal::Decimal;
use thiserror::Error;

/// Strategy error taxonomy.
///
/// Transient variants resolve to "no quotes this tick": the caller logs,
/// skips the cycle, and retries on the next scheduled tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    #[error("insufficient candle history: have {have}, need {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("non-positive mid price from connector: {0}")]
    InvalidMidPrice(Price),

    #[error("crossed or incomplete book: bid {best_bid}, ask {best_ask}")]
    CrossedBook { best_bid: Price, best_ask: Price },

    #[error("quote pair inverted after clamping: buy {buy} >= sell {sell}")]
    InvertedQuotes { buy: Price, sell: Price },

    #[error("composed reference price is not positive: {0}")]
    NonPositiveReference(Decimal),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StrategyError {
    /// Whether this error is a skip-the-tick condition rather than a
    /// configuration defect.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_))
    }
}

/// Result type alias for strategy operations.
pub type Result<T> = std::result::Result<T, StrategyError>;

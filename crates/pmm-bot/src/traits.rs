//! Collaborator capabilities the tick cycle depends on.
//!
//! The strategy never talks to an exchange directly; it receives this
//! capability set at construction. Every call is blocking-to-the-tick:
//! the cycle does not proceed until the read returns.

use pmm_core::{Candle, OrderCandidate, OrderId, Price};
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure reported by an external collaborator. Propagates to the
/// scheduler; the next tick retries wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("candle feed error: {0}")]
    Candles(String),

    #[error("market data unavailable: {0}")]
    MarketData(String),

    #[error("balance query failed: {0}")]
    Balance(String),

    #[error("order rejected: {0}")]
    Order(String),

    #[error("budget check failed: {0}")]
    Budget(String),
}

pub type CollabResult<T> = Result<T, CollaboratorError>;

/// Read access to the rolling candle window.
#[cfg_attr(test, mockall::automock)]
pub trait CandleSource: Send {
    /// Most recent `length` candles in chronological order. May return
    /// fewer when the feed holds less history; the estimator decides
    /// whether that is enough.
    fn latest_window(&self, length: usize) -> CollabResult<Vec<Candle>>;
}

/// Connector-reported prices for the configured trading pair.
#[cfg_attr(test, mockall::automock)]
pub trait MarketData: Send {
    fn mid_price(&self) -> CollabResult<Price>;
    fn best_bid(&self) -> CollabResult<Price>;
    fn best_ask(&self) -> CollabResult<Price>;
}

/// Account balance lookup.
#[cfg_attr(test, mockall::automock)]
pub trait BalanceSource: Send {
    fn balance(&self, asset: &str) -> CollabResult<Decimal>;
}

/// Order submission and cancellation.
#[cfg_attr(test, mockall::automock)]
pub trait OrderSink: Send {
    fn submit(&self, candidate: &OrderCandidate) -> CollabResult<OrderId>;

    /// Cancel all resting orders for the configured market; returns the
    /// number cancelled.
    fn cancel_all(&self) -> CollabResult<usize>;
}

/// Budget/margin adjustment of the proposed candidates.
#[cfg_attr(test, mockall::automock)]
pub trait BudgetChecker: Send {
    /// May shrink or drop candidates. With `all_or_none`, either every
    /// candidate survives intact or none do; an empty result means "no
    /// quotes this tick" and is not an error.
    fn adjust(
        &self,
        candidates: Vec<OrderCandidate>,
        all_or_none: bool,
    ) -> CollabResult<Vec<OrderCandidate>>;
}

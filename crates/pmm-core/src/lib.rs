//! Core domain types for the PMM quoting bot.
//!
//! This crate provides the fundamental types shared across the strategy
//! and application crates:
//! - `Price`, `Size`: precision-safe numeric types
//! - `Candle`, `CandleWindow`: OHLCV samples and a fixed-capacity window
//! - `TopOfBook`: best bid/ask with validity classification
//! - `OrderSide`, `OrderCandidate`, `FillEvent`: order-flow types

pub mod book;
pub mod candle;
pub mod decimal;
pub mod order;

pub use book::{BookState, TopOfBook};
pub use candle::{Candle, CandleWindow};
pub use decimal::{Price, Size};
pub use order::{FillEvent, OrderCandidate, OrderId, OrderSide, OrderType};

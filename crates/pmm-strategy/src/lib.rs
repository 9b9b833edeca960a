//! Adaptive PMM pricing for the quoting bot.
//!
//! Three pure computation stages, run once per refresh tick:
//! - Estimator: NATR + RSI from the rolling candle window
//! - Composer: raw mid -> momentum shift -> inventory skew -> reference price
//! - Builder: reference price + spreads -> bid/ask candidates, clamped to the book
//!
//! # Architecture
//!
//! ```text
//! Tick → indicators::compute_snapshot()   (natr, rsi)
//!         ├─ pricing::compose_reference() → QuoteParameters
//!         └─ quotes::build_quote_pair()   → QuotePair (buy + sell)
//!              ↓
//!         budget check / order submission (pmm-bot)
//! ```

pub mod config;
pub mod error;
pub mod indicators;
pub mod inventory;
pub mod pricing;
pub mod quotes;

pub use config::StrategyConfig;
pub use error::{Result, StrategyError};
pub use indicators::{compute_snapshot, VolatilityMomentumSnapshot};
pub use inventory::InventoryState;
pub use pricing::{compose_reference, InventoryBias, QuoteParameters};
pub use quotes::{build_quote_pair, QuotePair};

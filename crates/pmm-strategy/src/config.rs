//! Strategy configuration.

use crate::error::{Result, StrategyError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Static strategy parameters, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Trading pair in BASE-QUOTE form (e.g. "ETH-USDT").
    #[serde(default = "default_trading_pair")]
    pub trading_pair: String,

    /// Exchange / connector identifier.
    #[serde(default = "default_exchange")]
    pub exchange: String,

    /// Refresh interval between quote cycles, in seconds.
    #[serde(default = "default_order_refresh_secs")]
    pub order_refresh_secs: u64,

    /// Fixed order size in base units, applied to both sides.
    #[serde(default = "default_order_amount")]
    pub order_amount: Decimal,

    /// Bid spread per unit of NATR.
    #[serde(default = "default_bid_spread_scalar")]
    pub bid_spread_scalar: f64,

    /// Ask spread per unit of NATR.
    #[serde(default = "default_ask_spread_scalar")]
    pub ask_spread_scalar: f64,

    /// Maximum magnitude of the momentum price shift, as a fraction.
    #[serde(default = "default_max_shift_spread")]
    pub max_shift_spread: f64,

    /// Sign and weight of the momentum shift.
    /// -1 = mean-reverting (RSI above 50 shifts the reference down),
    /// +1 = trend-following.
    #[serde(default = "default_trend_scalar")]
    pub trend_scalar: f64,

    /// Strength of the inventory skew applied to the reference price.
    #[serde(default = "default_inventory_skew_strength")]
    pub inventory_skew_strength: f64,

    /// Candle interval label (e.g. "1m").
    #[serde(default = "default_candles_interval")]
    pub candles_interval: String,

    /// Indicator lookback in candle periods.
    #[serde(default = "default_candles_length")]
    pub candles_length: usize,

    /// Maximum candles retained by the feed window.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

impl StrategyConfig {
    /// Validate static parameters. Rejections here are configuration
    /// defects, not skip-tick conditions.
    pub fn validate(&self) -> Result<()> {
        if self.split_assets().is_none() {
            return Err(StrategyError::InvalidConfig(format!(
                "trading_pair must be BASE-QUOTE, got {:?}",
                self.trading_pair
            )));
        }
        if self.order_refresh_secs == 0 {
            return Err(StrategyError::InvalidConfig(
                "order_refresh_secs must be > 0".into(),
            ));
        }
        if self.order_amount <= Decimal::ZERO {
            return Err(StrategyError::InvalidConfig(
                "order_amount must be > 0".into(),
            ));
        }
        if self.candles_length == 0 {
            return Err(StrategyError::InvalidConfig(
                "candles_length must be >= 1".into(),
            ));
        }
        if self.max_records <= self.candles_length {
            return Err(StrategyError::InvalidConfig(
                "max_records must exceed candles_length".into(),
            ));
        }
        if self.bid_spread_scalar < 0.0 || self.ask_spread_scalar < 0.0 {
            return Err(StrategyError::InvalidConfig(
                "spread scalars must be non-negative".into(),
            ));
        }
        if self.max_shift_spread < 0.0 {
            return Err(StrategyError::InvalidConfig(
                "max_shift_spread must be non-negative".into(),
            ));
        }
        if self.inventory_skew_strength < 0.0 {
            return Err(StrategyError::InvalidConfig(
                "inventory_skew_strength must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Base and quote asset symbols from the trading pair.
    pub fn split_assets(&self) -> Option<(&str, &str)> {
        match self.trading_pair.split_once('-') {
            Some((base, quote)) if !base.is_empty() && !quote.is_empty() => Some((base, quote)),
            _ => None,
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            trading_pair: default_trading_pair(),
            exchange: default_exchange(),
            order_refresh_secs: default_order_refresh_secs(),
            order_amount: default_order_amount(),
            bid_spread_scalar: default_bid_spread_scalar(),
            ask_spread_scalar: default_ask_spread_scalar(),
            max_shift_spread: default_max_shift_spread(),
            trend_scalar: default_trend_scalar(),
            inventory_skew_strength: default_inventory_skew_strength(),
            candles_interval: default_candles_interval(),
            candles_length: default_candles_length(),
            max_records: default_max_records(),
        }
    }
}

fn default_trading_pair() -> String {
    "ETH-USDT".to_string()
}
fn default_exchange() -> String {
    "binance_paper_trade".to_string()
}
fn default_order_refresh_secs() -> u64 {
    15
}
fn default_order_amount() -> Decimal {
    Decimal::new(1, 2) // 0.01
}
fn default_bid_spread_scalar() -> f64 {
    100.0
}
fn default_ask_spread_scalar() -> f64 {
    50.0
}
fn default_max_shift_spread() -> f64 {
    0.0005
}
fn default_trend_scalar() -> f64 {
    -1.0
}
fn default_inventory_skew_strength() -> f64 {
    0.5
}
fn default_candles_interval() -> String {
    "1m".to_string()
}
fn default_candles_length() -> usize {
    30
}
fn default_max_records() -> usize {
    1000
}

//! In-process paper-trade collaborators.
//!
//! A seeded random-walk mid price with synthesized candles, static
//! starting balances, and an in-memory order registry. One `SimExchange`
//! handle implements all five collaborator traits so the binary runs a
//! full quoting loop without any exchange connectivity.

use crate::traits::{
    BalanceSource, BudgetChecker, CandleSource, CollabResult, MarketData, OrderSink,
};
use parking_lot::Mutex;
use pmm_core::{Candle, CandleWindow, OrderCandidate, OrderId, OrderSide, Price, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Paper-trade simulator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Starting mid price.
    #[serde(default = "default_initial_mid")]
    pub initial_mid: f64,
    /// Per-step mid move bound in basis points.
    #[serde(default = "default_step_volatility_bps")]
    pub step_volatility_bps: f64,
    /// Half spread between mid and best bid/ask, in basis points.
    #[serde(default = "default_half_spread_bps")]
    pub half_spread_bps: f64,
    /// RNG seed; identical seeds replay identical price paths.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Starting base asset balance.
    #[serde(default = "default_base_balance")]
    pub base_balance: Decimal,
    /// Starting quote asset balance.
    #[serde(default = "default_quote_balance")]
    pub quote_balance: Decimal,
    /// Candles synthesized before the first tick, so the indicators
    /// have history from the start.
    #[serde(default = "default_prefill_candles")]
    pub prefill_candles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_mid: default_initial_mid(),
            step_volatility_bps: default_step_volatility_bps(),
            half_spread_bps: default_half_spread_bps(),
            seed: default_seed(),
            base_balance: default_base_balance(),
            quote_balance: default_quote_balance(),
            prefill_candles: default_prefill_candles(),
        }
    }
}

fn default_initial_mid() -> f64 {
    1850.0
}
fn default_step_volatility_bps() -> f64 {
    15.0
}
fn default_half_spread_bps() -> f64 {
    2.0
}
fn default_seed() -> u64 {
    42
}
fn default_base_balance() -> Decimal {
    Decimal::ONE
}
fn default_quote_balance() -> Decimal {
    Decimal::new(2000, 0)
}
fn default_prefill_candles() -> usize {
    64
}

struct SimState {
    mid: f64,
    rng: StdRng,
    window: CandleWindow,
    balances: HashMap<String, Decimal>,
    open_orders: HashMap<u64, OrderCandidate>,
    next_order_id: u64,
    step_count: u64,
}

/// Cloneable handle over the shared simulator state.
#[derive(Clone)]
pub struct SimExchange {
    state: Arc<Mutex<SimState>>,
    config: SimConfig,
    base_asset: String,
    quote_asset: String,
}

impl SimExchange {
    /// Build the simulator for a trading pair, pre-filling candle
    /// history per the config.
    pub fn new(
        config: SimConfig,
        base_asset: &str,
        quote_asset: &str,
        max_records: usize,
    ) -> Self {
        let mut balances = HashMap::new();
        balances.insert(base_asset.to_string(), config.base_balance);
        balances.insert(quote_asset.to_string(), config.quote_balance);

        let state = SimState {
            mid: config.initial_mid,
            rng: StdRng::seed_from_u64(config.seed),
            window: CandleWindow::new(max_records),
            balances,
            open_orders: HashMap::new(),
            next_order_id: 1,
            step_count: 0,
        };

        let sim = Self {
            state: Arc::new(Mutex::new(state)),
            config,
            base_asset: base_asset.to_string(),
            quote_asset: quote_asset.to_string(),
        };
        for _ in 0..sim.config.prefill_candles {
            sim.step();
        }
        sim
    }

    /// Advance the price walk by one step and finalize a candle.
    pub fn step(&self) {
        let mut state = self.state.lock();

        let open = state.mid;
        let move_frac = state.rng.gen_range(-1.0..=1.0) * self.config.step_volatility_bps / 10000.0;
        let close = (open * (1.0 + move_frac)).max(f64::MIN_POSITIVE);
        let wick_frac = state.rng.gen_range(0.0..=0.5) * self.config.step_volatility_bps / 10000.0;
        let high = open.max(close) * (1.0 + wick_frac);
        let low = open.min(close) * (1.0 - wick_frac);
        let volume = state.rng.gen_range(0.1..10.0);

        state.mid = close;
        state.step_count += 1;
        let opened_at = chrono::DateTime::from_timestamp(60 * state.step_count as i64, 0)
            .unwrap_or_else(chrono::Utc::now);

        let candle = Candle::new(
            to_price(open),
            to_price(high),
            to_price(low),
            to_price(close),
            Size::new(to_decimal(volume).round_dp(4)),
            opened_at,
        );
        state.window.push(candle);
    }

    /// Number of candles currently held.
    pub fn candle_count(&self) -> usize {
        self.state.lock().window.len()
    }

    fn mid(&self) -> f64 {
        self.state.lock().mid
    }
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO)
}

fn to_price(value: f64) -> Price {
    Price::new(to_decimal(value).round_dp(6))
}

impl CandleSource for SimExchange {
    fn latest_window(&self, length: usize) -> CollabResult<Vec<Candle>> {
        Ok(self.state.lock().window.tail(length))
    }
}

impl MarketData for SimExchange {
    fn mid_price(&self) -> CollabResult<Price> {
        Ok(to_price(self.mid()))
    }

    fn best_bid(&self) -> CollabResult<Price> {
        Ok(to_price(
            self.mid() * (1.0 - self.config.half_spread_bps / 10000.0),
        ))
    }

    fn best_ask(&self) -> CollabResult<Price> {
        Ok(to_price(
            self.mid() * (1.0 + self.config.half_spread_bps / 10000.0),
        ))
    }
}

impl BalanceSource for SimExchange {
    fn balance(&self, asset: &str) -> CollabResult<Decimal> {
        Ok(self
            .state
            .lock()
            .balances
            .get(asset)
            .copied()
            .unwrap_or(Decimal::ZERO))
    }
}

impl OrderSink for SimExchange {
    fn submit(&self, candidate: &OrderCandidate) -> CollabResult<OrderId> {
        let mut state = self.state.lock();
        let id = state.next_order_id;
        state.next_order_id += 1;
        state.open_orders.insert(id, candidate.clone());
        Ok(OrderId(id))
    }

    fn cancel_all(&self) -> CollabResult<usize> {
        let mut state = self.state.lock();
        let count = state.open_orders.len();
        state.open_orders.clear();
        Ok(count)
    }
}

impl BudgetChecker for SimExchange {
    fn adjust(
        &self,
        candidates: Vec<OrderCandidate>,
        all_or_none: bool,
    ) -> CollabResult<Vec<OrderCandidate>> {
        let state = self.state.lock();
        let affordable = |c: &OrderCandidate| {
            let (asset, needed) = match c.side {
                OrderSide::Buy => (&self.quote_asset, c.quote_notional()),
                OrderSide::Sell => (&self.base_asset, c.amount.inner()),
            };
            let balance = state.balances.get(asset).copied().unwrap_or(Decimal::ZERO);
            balance >= needed
        };

        if all_or_none {
            if candidates.iter().all(affordable) {
                Ok(candidates)
            } else {
                Ok(Vec::new())
            }
        } else {
            Ok(candidates.into_iter().filter(|c| affordable(c)).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sim() -> SimExchange {
        SimExchange::new(SimConfig::default(), "ETH", "USDT", 1000)
    }

    #[test]
    fn test_prefill_provides_history() {
        let sim = sim();
        assert_eq!(sim.candle_count(), SimConfig::default().prefill_candles);
        let window = sim.latest_window(31).unwrap();
        assert_eq!(window.len(), 31);
    }

    #[test]
    fn test_book_is_valid_around_mid() {
        let sim = sim();
        let bid = sim.best_bid().unwrap();
        let mid = sim.mid_price().unwrap();
        let ask = sim.best_ask().unwrap();

        assert!(bid.is_positive());
        assert!(bid < mid);
        assert!(mid < ask);
    }

    #[test]
    fn test_walk_stays_positive() {
        let sim = sim();
        for _ in 0..500 {
            sim.step();
        }
        assert!(sim.mid_price().unwrap().is_positive());
    }

    #[test]
    fn test_same_seed_replays_same_path() {
        let a = sim();
        let b = sim();
        for _ in 0..50 {
            a.step();
            b.step();
        }
        assert_eq!(a.mid_price().unwrap(), b.mid_price().unwrap());
    }

    #[test]
    fn test_order_registry_roundtrip() {
        let sim = sim();
        let candidate = OrderCandidate::limit(
            OrderSide::Buy,
            Price::new(dec!(1800)),
            Size::new(dec!(0.01)),
        );

        let id1 = sim.submit(&candidate).unwrap();
        let id2 = sim.submit(&candidate).unwrap();
        assert_ne!(id1, id2);

        assert_eq!(sim.cancel_all().unwrap(), 2);
        assert_eq!(sim.cancel_all().unwrap(), 0);
    }

    #[test]
    fn test_balances_by_asset() {
        let sim = sim();
        assert_eq!(sim.balance("ETH").unwrap(), dec!(1));
        assert_eq!(sim.balance("USDT").unwrap(), dec!(2000));
        assert_eq!(sim.balance("BTC").unwrap(), dec!(0));
    }

    #[test]
    fn test_budget_passes_affordable_pair() {
        let sim = sim();
        let pair = vec![
            OrderCandidate::limit(OrderSide::Buy, Price::new(dec!(1800)), Size::new(dec!(0.01))),
            OrderCandidate::limit(
                OrderSide::Sell,
                Price::new(dec!(1900)),
                Size::new(dec!(0.01)),
            ),
        ];
        let adjusted = sim.adjust(pair.clone(), true).unwrap();
        assert_eq!(adjusted, pair);
    }

    #[test]
    fn test_budget_all_or_none_drops_both() {
        let sim = sim();
        // Sell amount exceeds the 1 ETH base balance → both sides dropped
        let pair = vec![
            OrderCandidate::limit(OrderSide::Buy, Price::new(dec!(1800)), Size::new(dec!(0.01))),
            OrderCandidate::limit(OrderSide::Sell, Price::new(dec!(1900)), Size::new(dec!(5))),
        ];
        let adjusted = sim.adjust(pair, true).unwrap();
        assert!(adjusted.is_empty());
    }

    #[test]
    fn test_budget_partial_without_all_or_none() {
        let sim = sim();
        let pair = vec![
            OrderCandidate::limit(OrderSide::Buy, Price::new(dec!(1800)), Size::new(dec!(0.01))),
            OrderCandidate::limit(OrderSide::Sell, Price::new(dec!(1900)), Size::new(dec!(5))),
        ];
        let adjusted = sim.adjust(pair, false).unwrap();
        assert_eq!(adjusted.len(), 1);
        assert_eq!(adjusted[0].side, OrderSide::Buy);
    }
}

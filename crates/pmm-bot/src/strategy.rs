//! The tick-driven quoting state machine.
//!
//! One cycle per refresh interval: cancel resting orders, recompute the
//! indicator snapshot, compose the reference price, build the clamped
//! quote pair, budget-check, submit. `QuoteParameters` is the only
//! persistent mutable state and is swapped whole after a successful
//! composition, so `status()` never shows a half-updated cycle.

use crate::error::{AppError, AppResult};
use crate::traits::{BalanceSource, BudgetChecker, CandleSource, MarketData, OrderSink};
use pmm_core::{FillEvent, OrderId, Size, TopOfBook};
use pmm_strategy::{
    build_quote_pair, compose_reference, compute_snapshot, InventoryState, QuoteParameters,
    StrategyConfig, StrategyError,
};
use rust_decimal_macros::dec;
use tracing::{info, warn};

/// Injected capability set; everything the tick cycle touches outside
/// its own state.
pub struct Collaborators {
    pub candles: Box<dyn CandleSource>,
    pub market: Box<dyn MarketData>,
    pub balances: Box<dyn BalanceSource>,
    pub orders: Box<dyn OrderSink>,
    pub budget: Box<dyn BudgetChecker>,
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Refresh interval not yet elapsed; nothing was done.
    Idle,
    /// Transient condition; no quotes this tick, retry next tick.
    Skipped(StrategyError),
    /// Budget checker dropped both candidates; expected, not an error.
    NoQuotes,
    /// Quote pair built; `submitted` orders accepted by the sink.
    Quoted { submitted: usize },
}

/// Adaptive PMM strategy instance for a single trading pair.
pub struct PmmStrategy {
    config: StrategyConfig,
    base_asset: String,
    quote_asset: String,
    collab: Collaborators,
    quote_params: QuoteParameters,
    active_orders: Vec<OrderId>,
    next_refresh_ms: u64,
}

impl PmmStrategy {
    /// Create a strategy from validated configuration and the
    /// collaborator set.
    pub fn new(config: StrategyConfig, collab: Collaborators) -> AppResult<Self> {
        config.validate()?;
        let (base, quote) = config
            .split_assets()
            .ok_or_else(|| AppError::Config("trading_pair must be BASE-QUOTE".into()))?;
        let (base_asset, quote_asset) = (base.to_string(), quote.to_string());

        Ok(Self {
            config,
            base_asset,
            quote_asset,
            collab,
            quote_params: QuoteParameters::default(),
            active_orders: Vec::new(),
            next_refresh_ms: 0,
        })
    }

    /// Drive one pricing + quoting cycle.
    ///
    /// Ticks arriving before the refresh deadline are no-ops. A skipped
    /// cycle does not advance the deadline, so the next scheduler tick
    /// retries immediately.
    pub fn on_tick(&mut self, now_ms: u64) -> AppResult<TickOutcome> {
        if now_ms < self.next_refresh_ms {
            return Ok(TickOutcome::Idle);
        }

        let cancelled = self.collab.orders.cancel_all()?;
        self.active_orders.clear();
        if cancelled > 0 {
            info!(cancelled, "cancelled resting orders");
        }

        let window = self
            .collab
            .candles
            .latest_window(self.config.candles_length + 1)?;
        let snapshot = match compute_snapshot(&window, self.config.candles_length) {
            Ok(s) => s,
            Err(e) => return self.skip(e),
        };

        let mid = self.collab.market.mid_price()?;
        let base_qty = self.collab.balances.balance(&self.base_asset)?;
        let quote_qty = self.collab.balances.balance(&self.quote_asset)?;
        let inventory = InventoryState::new(base_qty, quote_qty);

        let params = match compose_reference(mid, &snapshot, &inventory, &self.config) {
            Ok(p) => p,
            Err(e) => return self.skip(e),
        };
        // Full composition succeeded: publish the new parameters whole.
        self.quote_params = params;

        let book = TopOfBook::new(
            self.collab.market.best_bid()?,
            self.collab.market.best_ask()?,
        );
        let pair = match build_quote_pair(
            &self.quote_params,
            &book,
            Size::new(self.config.order_amount),
        ) {
            Ok(p) => p,
            Err(e) => return self.skip(e),
        };

        let adjusted = self.collab.budget.adjust(pair.into_candidates(), true)?;
        self.next_refresh_ms = now_ms + self.config.order_refresh_secs * 1000;

        if adjusted.is_empty() {
            info!("budget exhausted, no quotes this tick");
            return Ok(TickOutcome::NoQuotes);
        }

        let mut submitted = 0;
        for candidate in &adjusted {
            // One side's rejection must not block the other side.
            match self.collab.orders.submit(candidate) {
                Ok(order_id) => {
                    self.active_orders.push(order_id);
                    submitted += 1;
                    info!(
                        side = %candidate.side,
                        price = %candidate.price,
                        amount = %candidate.amount,
                        %order_id,
                        "order placed"
                    );
                }
                Err(e) => {
                    warn!(side = %candidate.side, error = %e, "order submission rejected");
                }
            }
        }

        Ok(TickOutcome::Quoted { submitted })
    }

    fn skip(&self, err: StrategyError) -> AppResult<TickOutcome> {
        if err.is_transient() {
            warn!(error = %err, "skipping tick");
            Ok(TickOutcome::Skipped(err))
        } else {
            Err(AppError::Strategy(err))
        }
    }

    /// Fill notification hook. Log-only; inventory is re-read from the
    /// balance collaborator every tick.
    pub fn on_order_filled(&self, event: &FillEvent) {
        info!(
            pair = %event.trading_pair,
            side = %event.side,
            price = %event.price,
            amount = %event.amount,
            "order filled"
        );
    }

    /// Cancel everything; used on shutdown.
    pub fn cancel_all(&mut self) -> AppResult<usize> {
        let cancelled = self.collab.orders.cancel_all()?;
        self.active_orders.clear();
        Ok(cancelled)
    }

    /// Human-readable snapshot of the last successfully computed
    /// parameters.
    pub fn status(&self) -> String {
        let bps = dec!(10000);
        format!(
            "\n====== Market Maker Status ======\n\
             Pair: {} @ {}\n\
             Ref Price: {}\n\
             Bid Spread (bps): {}\n\
             Ask Spread (bps): {}\n\
             Active Orders: {}",
            self.config.trading_pair,
            self.config.exchange,
            self.quote_params.reference_price.inner().round_dp(2),
            (self.quote_params.bid_spread * bps).round_dp(1),
            (self.quote_params.ask_spread * bps).round_dp(1),
            self.active_orders.len(),
        )
    }

    pub fn quote_parameters(&self) -> &QuoteParameters {
        &self.quote_params
    }

    pub fn active_order_count(&self) -> usize {
        self.active_orders.len()
    }
}

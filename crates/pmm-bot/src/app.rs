//! Application wiring and the scheduler loop.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::sim::SimExchange;
use crate::strategy::{Collaborators, PmmStrategy, TickOutcome};
use tracing::{debug, error, info, warn};

/// Scheduler tick period. The strategy's own refresh gate decides
/// which ticks actually quote.
const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

/// Owns the simulator and the strategy; drives the tick loop.
pub struct Application {
    strategy: PmmStrategy,
    sim: SimExchange,
}

impl Application {
    /// Wire the paper-trade simulator into the strategy.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let (base, quote) = config
            .strategy
            .split_assets()
            .ok_or_else(|| AppError::Config("trading_pair must be BASE-QUOTE".into()))?;

        let sim = SimExchange::new(
            config.sim.clone(),
            base,
            quote,
            config.strategy.max_records,
        );

        let collab = Collaborators {
            candles: Box::new(sim.clone()),
            market: Box::new(sim.clone()),
            balances: Box::new(sim.clone()),
            orders: Box::new(sim.clone()),
            budget: Box::new(sim.clone()),
        };

        let strategy = PmmStrategy::new(config.strategy, collab)?;
        Ok(Self { strategy, sim })
    }

    /// Run until ctrl-c; cancels resting orders on the way out.
    pub async fn run(&mut self) -> AppResult<()> {
        info!("starting quoting loop");
        let mut ticker = tokio::time::interval(TICK_INTERVAL);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sim.step();
                    let now_ms = chrono::Utc::now().timestamp_millis() as u64;
                    match self.strategy.on_tick(now_ms) {
                        Ok(TickOutcome::Idle) => {}
                        Ok(TickOutcome::Skipped(reason)) => {
                            debug!(reason = %reason, "cycle skipped");
                        }
                        Ok(TickOutcome::NoQuotes) => {
                            info!("budget exhausted, no quotes this cycle");
                        }
                        Ok(TickOutcome::Quoted { submitted }) => {
                            info!(submitted, "quote pair placed");
                            info!("{}", self.strategy.status());
                        }
                        Err(e) => {
                            // Collaborator faults are retried on the
                            // next cycle rather than taking the loop down.
                            error!(error = %e, "tick failed");
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        match self.strategy.cancel_all() {
            Ok(cancelled) => info!(cancelled, "resting orders cancelled on shutdown"),
            Err(e) => warn!(error = %e, "failed to cancel orders on shutdown"),
        }
        Ok(())
    }
}

//! Tick-driven PMM quoting bot.
//!
//! Orchestrates one pricing cycle per refresh interval:
//! - cancel resting orders
//! - estimate volatility/momentum from the candle window
//! - compose the reference price (momentum shift + inventory skew)
//! - build and clamp the buy/sell quote pair
//! - budget-check and submit
//!
//! Exchange access is abstracted behind five collaborator traits; the
//! shipped implementation is an in-process paper-trade simulator.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod sim;
pub mod strategy;
pub mod traits;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use strategy::{Collaborators, PmmStrategy, TickOutcome};

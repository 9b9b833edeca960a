//! Reference price composition.
//!
//! Sequential multiplicative pipeline, order matters:
//! 1. spreads from NATR
//! 2. momentum multiplier from RSI
//! 3. shifted price = mid * (1 + multiplier)
//! 4. skew from inventory ratio
//! 5. reference = shifted * (1 + skew)
//!
//! Indicator statistics arrive as f64 and are converted to `Decimal` at
//! this boundary; all price arithmetic stays in `Decimal`.

use crate::config::StrategyConfig;
use crate::error::{Result, StrategyError};
use crate::indicators::VolatilityMomentumSnapshot;
use crate::inventory::InventoryState;
use pmm_core::Price;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;
use tracing::info;

/// The persistent quoting state, replaced wholesale on every successful
/// composition so readers never observe a half-updated cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteParameters {
    /// Bid spread as a fraction of the reference price.
    pub bid_spread: Decimal,
    /// Ask spread as a fraction of the reference price.
    pub ask_spread: Decimal,
    /// Fair-value estimate used as the quoting midpoint.
    pub reference_price: Price,
}

impl Default for QuoteParameters {
    fn default() -> Self {
        Self {
            bid_spread: dec!(0.0001),
            ask_spread: dec!(0.0001),
            reference_price: Price::ONE,
        }
    }
}

/// Qualitative inventory bias, decided by exact-zero comparison on the
/// skew term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryBias {
    /// Holdings lean toward the base asset; the skew favors sells.
    HeavyInBase,
    /// Holdings lean toward the quote asset; the skew favors buys.
    HeavyInQuote,
    Balanced,
}

impl InventoryBias {
    pub fn from_skew(skew: Decimal) -> Self {
        if skew > Decimal::ZERO {
            Self::HeavyInQuote
        } else if skew < Decimal::ZERO {
            Self::HeavyInBase
        } else {
            Self::Balanced
        }
    }
}

impl fmt::Display for InventoryBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeavyInBase => write!(f, "heavy-in-base (favoring sells)"),
            Self::HeavyInQuote => write!(f, "heavy-in-quote (favoring buys)"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO)
}

/// Compose updated quote parameters from the raw mid price, the
/// indicator snapshot, and current inventory.
///
/// Fails on a non-positive mid price (collaborator error, skip the
/// tick). A zero-NATR flat market collapses the spreads to zero, which
/// is accepted.
pub fn compose_reference(
    raw_mid: Price,
    snapshot: &VolatilityMomentumSnapshot,
    inventory: &InventoryState,
    config: &StrategyConfig,
) -> Result<QuoteParameters> {
    if !raw_mid.is_positive() {
        return Err(StrategyError::InvalidMidPrice(raw_mid));
    }

    let bid_spread = to_decimal((snapshot.natr * config.bid_spread_scalar).max(0.0));
    let ask_spread = to_decimal((snapshot.natr * config.ask_spread_scalar).max(0.0));

    // (rsi - 50) / 50 ∈ [-1, 1] bounds the shift by max_shift_spread
    let price_multiplier =
        ((snapshot.rsi - 50.0) / 50.0) * config.max_shift_spread * config.trend_scalar;
    let shifted_price = raw_mid.inner() * (Decimal::ONE + to_decimal(price_multiplier));

    let inventory_ratio = inventory.ratio(raw_mid);
    let skew = (dec!(0.5) - inventory_ratio) * to_decimal(config.inventory_skew_strength);
    let reference_price = shifted_price * (Decimal::ONE + skew);

    if reference_price <= Decimal::ZERO {
        return Err(StrategyError::NonPositiveReference(reference_price));
    }

    info!(
        natr = snapshot.natr,
        bid_bps = %(bid_spread * dec!(10000)).round_dp(1),
        ask_bps = %(ask_spread * dec!(10000)).round_dp(1),
        "volatility spreads updated"
    );
    info!(
        rsi = snapshot.rsi,
        shift_bps = price_multiplier * 10000.0,
        "momentum price shift"
    );
    info!(
        inventory_ratio = %inventory_ratio.round_dp(4),
        bias = %InventoryBias::from_skew(skew),
        "inventory skew"
    );

    Ok(QuoteParameters {
        bid_spread,
        ask_spread,
        reference_price: Price::new(reference_price),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    fn balanced_inventory() -> InventoryState {
        // ratio 0.5 at mid 100: 5 base * 100 = 500 value, 500 quote
        InventoryState::new(dec!(5), dec!(500))
    }

    fn snapshot(natr: f64, rsi: f64) -> VolatilityMomentumSnapshot {
        VolatilityMomentumSnapshot { natr, rsi }
    }

    #[test]
    fn test_spreads_scale_with_natr() {
        // natr 0.002 with bid scalar 100 → bid spread 0.2; ask scalar 50 → 0.1
        let config = StrategyConfig::default();
        let params = compose_reference(
            Price::new(dec!(100)),
            &snapshot(0.002, 50.0),
            &balanced_inventory(),
            &config,
        )
        .unwrap();

        assert!((params.bid_spread.to_f64().unwrap() - 0.2).abs() < 1e-12);
        assert!((params.ask_spread.to_f64().unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_momentum_shift_mean_reverting() {
        // rsi 75, max_shift 0.0005, trend -1 → multiplier -0.00025
        let config = StrategyConfig::default();
        let params = compose_reference(
            Price::new(dec!(100)),
            &snapshot(0.0, 75.0),
            &balanced_inventory(),
            &config,
        )
        .unwrap();

        let reference = params.reference_price.inner().to_f64().unwrap();
        assert!((reference - 99.975).abs() < 1e-9);
    }

    #[test]
    fn test_quote_heavy_inventory_skews_up() {
        // base 0, quote 1000 → ratio 0, skew = 0.5 * 0.5 = 0.25 exactly
        let config = StrategyConfig::default();
        let inventory = InventoryState::new(dec!(0), dec!(1000));
        let params = compose_reference(
            Price::new(dec!(100)),
            &snapshot(0.0, 50.0),
            &inventory,
            &config,
        )
        .unwrap();

        assert_eq!(params.reference_price, Price::new(dec!(125.0)));
    }

    #[test]
    fn test_balanced_inventory_leaves_shifted_price_exact() {
        // ratio 0.5 ⇒ skew 0 ⇒ reference == shifted == mid (rsi neutral)
        let config = StrategyConfig::default();
        let params = compose_reference(
            Price::new(dec!(1847.25)),
            &snapshot(0.0, 50.0),
            &InventoryState::new(dec!(1), dec!(1847.25)),
            &config,
        )
        .unwrap();

        assert_eq!(params.reference_price, Price::new(dec!(1847.25)));
    }

    #[test]
    fn test_flat_market_collapses_spreads() {
        let config = StrategyConfig::default();
        let params = compose_reference(
            Price::new(dec!(100)),
            &snapshot(0.0, 50.0),
            &balanced_inventory(),
            &config,
        )
        .unwrap();

        assert_eq!(params.bid_spread, Decimal::ZERO);
        assert_eq!(params.ask_spread, Decimal::ZERO);
        assert!(params.reference_price.is_positive());
    }

    #[test]
    fn test_non_positive_mid_fails() {
        let config = StrategyConfig::default();
        let err = compose_reference(
            Price::ZERO,
            &snapshot(0.001, 50.0),
            &balanced_inventory(),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, StrategyError::InvalidMidPrice(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_rising_natr_strictly_widens_spreads() {
        let config = StrategyConfig::default();
        let inventory = balanced_inventory();
        let mid = Price::new(dec!(100));

        let low = compose_reference(mid, &snapshot(0.001, 50.0), &inventory, &config).unwrap();
        let high = compose_reference(mid, &snapshot(0.003, 50.0), &inventory, &config).unwrap();

        assert!(high.bid_spread > low.bid_spread);
        assert!(high.ask_spread > low.ask_spread);
    }

    #[test]
    fn test_rsi_above_neutral_lowers_reference_when_mean_reverting() {
        let config = StrategyConfig::default();
        let inventory = balanced_inventory();
        let mid = Price::new(dec!(100));

        let neutral = compose_reference(mid, &snapshot(0.0, 50.0), &inventory, &config).unwrap();
        let hot = compose_reference(mid, &snapshot(0.0, 80.0), &inventory, &config).unwrap();

        assert!(hot.reference_price < neutral.reference_price);
    }

    #[test]
    fn test_bias_labels_from_skew() {
        assert_eq!(
            InventoryBias::from_skew(dec!(0.1)),
            InventoryBias::HeavyInQuote
        );
        assert_eq!(
            InventoryBias::from_skew(dec!(-0.1)),
            InventoryBias::HeavyInBase
        );
        assert_eq!(InventoryBias::from_skew(dec!(0)), InventoryBias::Balanced);
    }

    #[test]
    fn test_default_parameters_are_sane() {
        let params = QuoteParameters::default();
        assert!(params.bid_spread > Decimal::ZERO);
        assert!(params.ask_spread > Decimal::ZERO);
        assert!(params.reference_price.is_positive());
    }
}

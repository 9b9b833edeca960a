//! Volatility and momentum estimation from the candle window.
//!
//! Two indicators over the same lookback span:
//! - NATR: average true range divided by the last close, as a fraction.
//!   A flat market yields 0, which collapses the spreads to 0 downstream.
//! - RSI: bounded momentum oscillator in [0, 100], 50 = neutral.
//!
//! Both are pure functions of the window snapshot. True range and RSI
//! deltas reference the previous close, so `lookback` periods require
//! `lookback + 1` candles.

use crate::error::{Result, StrategyError};
use pmm_core::Candle;
use rust_decimal::prelude::ToPrimitive;

/// Indicator pair recomputed every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityMomentumSnapshot {
    /// Normalized average true range, a non-negative fraction.
    pub natr: f64,
    /// Relative strength index in [0, 100].
    pub rsi: f64,
}

/// Compute NATR and RSI over the `lookback` most recent periods.
///
/// Fails with `InsufficientData` when the window holds fewer than
/// `lookback + 1` candles; callers must skip the tick rather than quote
/// on a partial indicator value.
pub fn compute_snapshot(candles: &[Candle], lookback: usize) -> Result<VolatilityMomentumSnapshot> {
    let need = lookback.max(1) + 1;
    if lookback == 0 || candles.len() < need {
        return Err(StrategyError::InsufficientData {
            have: candles.len(),
            need,
        });
    }

    let tail = &candles[candles.len() - need..];
    Ok(VolatilityMomentumSnapshot {
        natr: natr(tail, lookback),
        rsi: rsi(tail, lookback),
    })
}

fn to_f64(price: pmm_core::Price) -> f64 {
    price.inner().to_f64().unwrap_or(0.0)
}

/// Normalized ATR: mean true range over the span, divided by last close.
fn natr(tail: &[Candle], lookback: usize) -> f64 {
    let mut tr_sum = 0.0;
    for pair in tail.windows(2) {
        let prev_close = to_f64(pair[0].close);
        let high = to_f64(pair[1].high);
        let low = to_f64(pair[1].low);

        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());
        tr_sum += tr;
    }

    let atr = tr_sum / lookback as f64;
    let last_close = to_f64(tail[tail.len() - 1].close);
    if last_close <= 0.0 {
        return 0.0;
    }
    (atr / last_close).max(0.0)
}

/// RSI from average gain/loss over the span. 50 when the market is flat.
fn rsi(tail: &[Candle], lookback: usize) -> f64 {
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in tail.windows(2) {
        let delta = to_f64(pair[1].close) - to_f64(pair[0].close);
        if delta >= 0.0 {
            gain_sum += delta;
        } else {
            loss_sum += -delta;
        }
    }

    let avg_gain = gain_sum / lookback as f64;
    let avg_loss = loss_sum / lookback as f64;

    if avg_gain == 0.0 && avg_loss == 0.0 {
        return 50.0;
    }
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmm_core::{Price, Size};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn candle(open: Decimal, high: Decimal, low: Decimal, close: Decimal, minute: i64) -> Candle {
        Candle::new(
            Price::new(open),
            Price::new(high),
            Price::new(low),
            Price::new(close),
            Size::new(dec!(1)),
            chrono::DateTime::from_timestamp(60 * minute, 0).unwrap(),
        )
    }

    fn flat_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| candle(dec!(100), dec!(100), dec!(100), dec!(100), i as i64))
            .collect()
    }

    #[test]
    fn test_insufficient_data_fails() {
        // 5 samples against a 30-period lookback must fail explicitly
        let candles = flat_candles(5);
        let err = compute_snapshot(&candles, 30).unwrap_err();
        assert_eq!(err, StrategyError::InsufficientData { have: 5, need: 31 });
        assert!(err.is_transient());
    }

    #[test]
    fn test_exact_minimum_history_succeeds() {
        let candles = flat_candles(31);
        assert!(compute_snapshot(&candles, 30).is_ok());
        assert!(compute_snapshot(&candles[..30], 30).is_err());
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let candles = flat_candles(10);
        assert!(compute_snapshot(&candles, 0).is_err());
    }

    #[test]
    fn test_flat_market_is_neutral() {
        let snapshot = compute_snapshot(&flat_candles(20), 10).unwrap();
        assert_eq!(snapshot.natr, 0.0);
        assert_eq!(snapshot.rsi, 50.0);
    }

    #[test]
    fn test_known_natr_value() {
        // One period: prev close 100, then high 101 / low 99
        // TR = 2, ATR = 2, NATR = 2 / 100 = 0.02
        let candles = vec![
            candle(dec!(100), dec!(100), dec!(100), dec!(100), 0),
            candle(dec!(100), dec!(101), dec!(99), dec!(100), 1),
        ];
        let snapshot = compute_snapshot(&candles, 1).unwrap();
        assert!((snapshot.natr - 0.02).abs() < 1e-12);
        assert_eq!(snapshot.rsi, 50.0);
    }

    #[test]
    fn test_gap_counts_toward_true_range() {
        // Gap up: prev close 100, next candle entirely above at 104-105.
        // TR = max(1, 5, 4) = 5
        let candles = vec![
            candle(dec!(100), dec!(100), dec!(100), dec!(100), 0),
            candle(dec!(104), dec!(105), dec!(104), dec!(105), 1),
        ];
        let snapshot = compute_snapshot(&candles, 1).unwrap();
        assert!((snapshot.natr - 5.0 / 105.0).abs() < 1e-12);
    }

    #[test]
    fn test_rsi_bounds() {
        // Strictly rising closes → RSI = 100
        let rising: Vec<Candle> = (0..11)
            .map(|i| {
                let px = Decimal::from(100 + i);
                candle(px, px, px, px, i as i64)
            })
            .collect();
        let snapshot = compute_snapshot(&rising, 10).unwrap();
        assert_eq!(snapshot.rsi, 100.0);

        // Strictly falling closes → RSI = 0
        let falling: Vec<Candle> = (0..11)
            .map(|i| {
                let px = Decimal::from(200 - i);
                candle(px, px, px, px, i as i64)
            })
            .collect();
        let snapshot = compute_snapshot(&falling, 10).unwrap();
        assert_eq!(snapshot.rsi, 0.0);
    }

    #[test]
    fn test_rsi_mixed_moves() {
        // Two periods: +3 then -1 → avg_gain 1.5, avg_loss 0.5
        // RS = 3, RSI = 100 - 100/4 = 75
        let candles = vec![
            candle(dec!(100), dec!(100), dec!(100), dec!(100), 0),
            candle(dec!(103), dec!(103), dec!(103), dec!(103), 1),
            candle(dec!(102), dec!(102), dec!(102), dec!(102), 2),
        ];
        let snapshot = compute_snapshot(&candles, 2).unwrap();
        assert!((snapshot.rsi - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_wider_ranges_increase_natr() {
        let narrow: Vec<Candle> = (0..11)
            .map(|i| candle(dec!(100), dec!(100.5), dec!(99.5), dec!(100), i as i64))
            .collect();
        let wide: Vec<Candle> = (0..11)
            .map(|i| candle(dec!(100), dec!(102), dec!(98), dec!(100), i as i64))
            .collect();

        let n1 = compute_snapshot(&narrow, 10).unwrap().natr;
        let n2 = compute_snapshot(&wide, 10).unwrap().natr;
        assert!(n2 > n1);
    }

    #[test]
    fn test_idempotent_on_same_snapshot() {
        let candles: Vec<Candle> = (0..31)
            .map(|i| {
                let px = Decimal::from(100 + (i % 7));
                candle(px, px + dec!(1), px - dec!(1), px, i as i64)
            })
            .collect();

        let a = compute_snapshot(&candles, 30).unwrap();
        let b = compute_snapshot(&candles, 30).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_only_lookback_span_is_read() {
        // Identical tails with different older history must agree
        let tail: Vec<Candle> = (0..11)
            .map(|i| candle(dec!(100), dec!(101), dec!(99), dec!(100), 10 + i as i64))
            .collect();

        let mut with_history = vec![candle(dec!(500), dec!(600), dec!(400), dec!(550), 0)];
        with_history.extend(tail.clone());

        let a = compute_snapshot(&tail, 10).unwrap();
        let b = compute_snapshot(&with_history, 10).unwrap();
        assert_eq!(a, b);
    }
}

//! Quote pair construction from the composed parameters.
//!
//! Buy and sell prices are symmetric around the reference price, then
//! clamped against the live book: never buy above the best bid, never
//! sell below the best ask. Inventory skew moves price only; both sides
//! carry the same fixed amount.

use crate::error::{Result, StrategyError};
use crate::pricing::QuoteParameters;
use pmm_core::{OrderCandidate, OrderSide, Price, Size, TopOfBook};
use rust_decimal::Decimal;

/// Exactly one buy and one sell candidate per refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePair {
    pub buy: OrderCandidate,
    pub sell: OrderCandidate,
}

impl QuotePair {
    pub fn into_candidates(self) -> Vec<OrderCandidate> {
        vec![self.buy, self.sell]
    }
}

/// Build the buy/sell candidates for this tick.
///
/// Fails on a crossed or incomplete book, or when clamping would invert
/// the pair (buy >= sell). Both are transient upstream conditions: skip
/// the tick and retry on the next one.
pub fn build_quote_pair(
    params: &QuoteParameters,
    book: &TopOfBook,
    order_amount: Size,
) -> Result<QuotePair> {
    if !book.is_valid() {
        return Err(StrategyError::CrossedBook {
            best_bid: book.best_bid,
            best_ask: book.best_ask,
        });
    }

    let reference = params.reference_price.inner();
    let raw_buy = reference * (Decimal::ONE - params.bid_spread);
    let raw_sell = reference * (Decimal::ONE + params.ask_spread);

    let buy_price = Price::new(raw_buy.min(book.best_bid.inner()));
    let sell_price = Price::new(raw_sell.max(book.best_ask.inner()));

    if buy_price >= sell_price {
        return Err(StrategyError::InvertedQuotes {
            buy: buy_price,
            sell: sell_price,
        });
    }

    Ok(QuotePair {
        buy: OrderCandidate::limit(OrderSide::Buy, buy_price, order_amount),
        sell: OrderCandidate::limit(OrderSide::Sell, sell_price, order_amount),
    })
}

//! Order-flow types: sides, candidates, identifiers, and fill events.

use crate::{Price, Size};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order type. The strategy only emits resting limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Limit,
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limit => write!(f, "limit"),
            Self::Market => write!(f, "market"),
        }
    }
}

/// Exchange-assigned order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A proposed order for one side of the quote pair.
///
/// Tick-scoped: constructed fresh each refresh cycle, handed to the
/// budget checker and order sink, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCandidate {
    pub side: OrderSide,
    pub order_type: OrderType,
    pub price: Price,
    pub amount: Size,
}

impl OrderCandidate {
    /// Create a limit order candidate.
    pub fn limit(side: OrderSide, price: Price, amount: Size) -> Self {
        Self {
            side,
            order_type: OrderType::Limit,
            price,
            amount,
        }
    }

    /// Quote currency required to place this order.
    ///
    /// Buys lock quote currency (price * amount); sells lock base.
    pub fn quote_notional(&self) -> rust_decimal::Decimal {
        self.amount.notional(self.price)
    }
}

/// Notification that one of our orders (partially) filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillEvent {
    pub trading_pair: String,
    pub side: OrderSide,
    pub price: Price,
    pub amount: Size,
    pub filled_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn test_candidate_quote_notional() {
        let candidate = OrderCandidate::limit(
            OrderSide::Buy,
            Price::new(dec!(1850.5)),
            Size::new(dec!(0.01)),
        );
        assert_eq!(candidate.quote_notional(), dec!(18.505));
        assert_eq!(candidate.order_type, OrderType::Limit);
    }
}

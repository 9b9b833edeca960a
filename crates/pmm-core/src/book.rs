//! Top-of-book snapshot used to clamp quotes against the live market.

use crate::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a top-of-book snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    /// Both sides present and bid < ask.
    Valid,
    /// One or both sides missing (zero or negative price).
    Missing,
    /// Both sides present but bid >= ask.
    Crossed,
}

impl BookState {
    pub fn is_tradeable(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for BookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "VALID"),
            Self::Missing => write!(f, "MISSING"),
            Self::Crossed => write!(f, "CROSSED"),
        }
    }
}

/// Best bid and best ask as reported by the market data collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopOfBook {
    pub best_bid: Price,
    pub best_ask: Price,
}

impl TopOfBook {
    pub fn new(best_bid: Price, best_ask: Price) -> Self {
        Self { best_bid, best_ask }
    }

    /// Mid price: (bid + ask) / 2. None unless the book is valid.
    pub fn mid_price(&self) -> Option<Price> {
        if !self.state().is_tradeable() {
            return None;
        }
        Some(Price::new(
            (self.best_bid.inner() + self.best_ask.inner()) / rust_decimal::Decimal::TWO,
        ))
    }

    /// Classify the snapshot.
    pub fn state(&self) -> BookState {
        if !self.best_bid.is_positive() || !self.best_ask.is_positive() {
            return BookState::Missing;
        }
        if self.best_bid >= self.best_ask {
            return BookState::Crossed;
        }
        BookState::Valid
    }

    pub fn is_valid(&self) -> bool {
        self.state().is_tradeable()
    }
}

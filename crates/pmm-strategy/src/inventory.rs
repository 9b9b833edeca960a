//! Inventory state and the base/quote value ratio driving the skew.

use pmm_core::Price;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Base and quote holdings, as reported by the balance collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryState {
    pub base_qty: Decimal,
    pub quote_qty: Decimal,
}

impl InventoryState {
    pub fn new(base_qty: Decimal, quote_qty: Decimal) -> Self {
        Self { base_qty, quote_qty }
    }

    /// Fraction of total portfolio value held in the base asset.
    ///
    /// `base_qty * price / (base_qty * price + quote_qty)`, in [0, 1]
    /// whenever total value is positive. Defined as 0.5 (balanced) when
    /// total value is zero or negative, so an empty account skews nothing.
    pub fn ratio(&self, price: Price) -> Decimal {
        let base_value = self.base_qty * price.inner();
        let total_value = base_value + self.quote_qty;
        if total_value <= Decimal::ZERO {
            return dec!(0.5);
        }
        base_value / total_value
    }
}

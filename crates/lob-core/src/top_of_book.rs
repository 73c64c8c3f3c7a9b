//! Aggregated views of the book: top-of-book and depth.
//!
//! These are read-only snapshots; nothing in them refers back into
//! the live book.

use crate::order::{Price, Quantity};

/// All resting orders at one price on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevel {
    pub price: Price,
    /// Total remaining quantity at this price.
    pub quantity: Quantity,
    pub order_count: usize,
}

impl PriceLevel {
    pub fn new(price: Price, quantity: Quantity, order_count: usize) -> Self {
        PriceLevel {
            price,
            quantity,
            order_count,
        }
    }
}

/// Best bid and best ask, each `None` when that side is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopOfBookSnapshot {
    pub bid: Option<PriceLevel>,
    pub ask: Option<PriceLevel>,
}

impl TopOfBookSnapshot {
    pub fn new(bid: Option<PriceLevel>, ask: Option<PriceLevel>) -> Self {
        TopOfBookSnapshot { bid, ask }
    }

    /// Returns `true` if there is *no* bid and *no* ask.
    pub fn is_empty(&self) -> bool {
        self.bid.is_none() && self.ask.is_none()
    }

    /// `best ask - best bid`, when both sides are present and the
    /// difference fits in a `Price`.
    pub fn spread(&self) -> Option<Price> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => ask.price.checked_sub(bid.price),
            _ => None,
        }
    }
}

/// Price levels of both sides, best first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepthSnapshot {
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_needs_both_sides() {
        let bid = PriceLevel::new(99, 1, 1);
        let ask = PriceLevel::new(101, 1, 1);
        assert_eq!(TopOfBookSnapshot::new(Some(bid), Some(ask)).spread(), Some(2));
        assert_eq!(TopOfBookSnapshot::new(Some(bid), None).spread(), None);
        assert!(TopOfBookSnapshot::default().is_empty());
    }

    #[test]
    fn spread_too_wide_for_a_price_is_none() {
        let bid = PriceLevel::new(-10, 1, 1);
        let ask = PriceLevel::new(i64::MAX, 1, 1);
        assert_eq!(TopOfBookSnapshot::new(Some(bid), Some(ask)).spread(), None);
    }
}

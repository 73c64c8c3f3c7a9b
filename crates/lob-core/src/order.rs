//! Order representation used inside the book.
//!
//! An order carries its identity, side, limit price, the remaining
//! unfilled quantity and a submission sequence number. Only the
//! remaining quantity ever changes after creation.

use std::fmt;

use crate::side::Side;

/// Price in integer ticks. Decimal conversion is the caller's concern.
pub type Price = i64;

/// Order quantity in whole units.
pub type Quantity = u64;

/// Opaque, unique order identifier.
///
/// Produced by an [`IdGenerator`](crate::IdGenerator) when an order is
/// submitted; the book never interprets its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        OrderId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        OrderId(s.to_string())
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        OrderId(s)
    }
}

/// A single order in the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    /// Remaining unfilled quantity.
    pub quantity: Quantity,
    /// Submission sequence; lower means earlier (time priority).
    pub sequence: u64,
}

impl Order {
    pub fn new(id: OrderId, side: Side, price: Price, quantity: Quantity, sequence: u64) -> Self {
        Order {
            id,
            side,
            price,
            quantity,
            sequence,
        }
    }

    /// Returns `true` if the order is fully filled.
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    /// Fill the order by up to `qty` units.
    ///
    /// Returns the quantity that was actually filled (which will be
    /// `<= qty` and `<= quantity`).
    pub fn fill(&mut self, qty: Quantity) -> Quantity {
        let filled = qty.min(self.quantity);
        self.quantity -= filled;
        filled
    }

    /// Whether this order's limit price reaches a resting order priced
    /// at `resting_price` on the opposite side.
    pub fn crosses(&self, resting_price: Price) -> bool {
        match self.side {
            Side::Buy => self.price >= resting_price,
            Side::Sell => self.price <= resting_price,
        }
    }
}

//! One side of the book, ordered by price-time priority.
//!
//! - Bids: best = highest price.
//! - Asks: best = lowest price.
//! - Equal prices: best = lowest sequence (earliest submission).
//!
//! Orders live in a `BTreeMap` keyed by [`PriorityKey`], so the first
//! entry is always the best order. A second map from order id to key
//! makes cancel-by-id O(log n) instead of a linear scan over the side;
//! the price of that is one extra hash map entry per resting order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::error::BookError;
use crate::order::{Order, OrderId, Price, Quantity};
use crate::side::Side;
use crate::top_of_book::PriceLevel;

/// Sort key of a resting order within its side.
///
/// Keys are only ever compared with keys of the same side.
#[derive(Debug, Clone, Copy)]
pub struct PriorityKey {
    side: Side,
    price: Price,
    sequence: u64,
}

impl PriorityKey {
    pub fn of(order: &Order) -> Self {
        PriorityKey {
            side: order.side,
            price: order.price,
            sequence: order.sequence,
        }
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_price = match self.side {
            Side::Buy => other.price.cmp(&self.price),
            Side::Sell => self.price.cmp(&other.price),
        };
        by_price.then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PriorityKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityKey {}

/// Resting orders of a single side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSide {
    side: Side,
    orders: BTreeMap<PriorityKey, Order>,
    index: HashMap<OrderId, PriorityKey>,
}

impl BookSide {
    pub fn new(side: Side) -> Self {
        BookSide {
            side,
            orders: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Add a resting order.
    ///
    /// Orders with no remaining quantity are never stored. The id must not
    /// already rest on this side; `OrderBook::submit` rejects duplicates
    /// before they get here.
    pub fn insert(&mut self, order: Order) {
        debug_assert_eq!(order.side, self.side, "order inserted on the wrong side");
        debug_assert!(!self.index.contains_key(&order.id), "duplicate order id");
        if order.is_filled() {
            return;
        }
        let key = PriorityKey::of(&order);
        self.index.insert(order.id.clone(), key);
        self.orders.insert(key, order);
    }

    /// The current best order, without removing it.
    pub fn peek_best(&self) -> Option<&Order> {
        self.orders.first_key_value().map(|(_, order)| order)
    }

    /// Remove and return the current best order.
    pub fn pop_best(&mut self) -> Option<Order> {
        let (_, order) = self.orders.pop_first()?;
        self.index.remove(&order.id);
        Some(order)
    }

    /// Overwrite the best order's remaining quantity after a partial fill.
    ///
    /// Price and sequence are untouched, so the order keeps its place.
    /// A `new_quantity` of zero removes the order instead, and the removed
    /// order is returned.
    pub fn adjust_best_quantity(&mut self, new_quantity: Quantity) -> Option<Order> {
        if new_quantity == 0 {
            return self.pop_best();
        }
        if let Some(mut best) = self.orders.first_entry() {
            best.get_mut().quantity = new_quantity;
        }
        None
    }

    /// Remove the order with the given id.
    pub fn remove_by_id(&mut self, id: &OrderId) -> Result<Order, BookError> {
        let key = self.index.remove(id).ok_or_else(|| BookError::OrderNotFound {
            id: id.clone(),
            side: self.side,
        })?;
        self.orders.remove(&key).ok_or_else(|| BookError::OrderNotFound {
            id: id.clone(),
            side: self.side,
        })
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.index.get(id).and_then(|key| self.orders.get(key))
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.index.contains_key(id)
    }

    /// Orders in priority order, best first.
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.values()
    }

    /// Sum of remaining quantity across the side, saturating at `u64::MAX`.
    pub fn total_quantity(&self) -> Quantity {
        self.orders
            .values()
            .fold(0, |total: Quantity, o| total.saturating_add(o.quantity))
    }

    /// Aggregate the first `max_levels` distinct prices, best first.
    ///
    /// Level quantities saturate rather than overflow.
    pub fn levels(&self, max_levels: usize) -> Vec<PriceLevel> {
        let mut levels: Vec<PriceLevel> = Vec::new();

        for order in self.orders.values() {
            match levels.last_mut() {
                Some(level) if level.price == order.price => {
                    level.quantity = level.quantity.saturating_add(order.quantity);
                    level.order_count += 1;
                }
                _ => {
                    if levels.len() == max_levels {
                        break;
                    }
                    levels.push(PriceLevel::new(order.price, order.quantity, 1));
                }
            }
        }

        levels
    }

    /// Aggregated best price level, if any.
    pub fn best_level(&self) -> Option<PriceLevel> {
        self.levels(1).pop()
    }

    pub fn clear(&mut self) {
        self.orders.clear();
        self.index.clear();
    }
}

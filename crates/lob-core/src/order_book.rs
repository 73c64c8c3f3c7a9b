//! Limit order book with price-time priority.
//!
//! - Bids: descending by price (best = highest).
//! - Asks: ascending by price (best = lowest).
//! - FIFO (time priority) within each price.
//!
//! An incoming order first crosses the opposite side for as long as its
//! limit reaches the best resting price. Every execution happens at the
//! resting (maker) order's price. Whatever is left afterwards rests on the
//! order's own side.
//!
//! Mutation needs `&mut self`; share a book between threads through
//! [`SharedOrderBook`](crate::SharedOrderBook) or a single owning task.

use tracing::debug;

use crate::book_side::BookSide;
use crate::error::BookError;
use crate::id_gen::{IdGenerator, UuidGenerator};
use crate::messages::{Request, Response, SubmitReport, Trade};
use crate::order::{Order, OrderId, Price, Quantity};
use crate::side::Side;
use crate::top_of_book::{DepthSnapshot, TopOfBookSnapshot};

/// Single-instrument order book.
#[derive(Debug)]
pub struct OrderBook<G = UuidGenerator> {
    bids: BookSide,
    asks: BookSide,

    /// Sequence handed to the next accepted order.
    next_sequence: u64,

    ids: G,
}

impl OrderBook<UuidGenerator> {
    /// Create an empty book that names orders with random UUIDs.
    pub fn new() -> Self {
        OrderBook::with_id_generator(UuidGenerator)
    }
}

impl Default for OrderBook<UuidGenerator> {
    fn default() -> Self {
        OrderBook::new()
    }
}

impl<G: IdGenerator> OrderBook<G> {
    /// Create an empty book that takes order ids from `ids`.
    pub fn with_id_generator(ids: G) -> Self {
        OrderBook {
            bids: BookSide::new(Side::Buy),
            asks: BookSide::new(Side::Sell),
            next_sequence: 0,
            ids,
        }
    }

    /// Submit a new limit order.
    ///
    /// Crosses the opposite side first; any remainder rests on the book
    /// under the returned id. A zero quantity is rejected before an id
    /// or sequence number is consumed. An id the generator hands out while
    /// it is still resting is rejected before any matching happens.
    pub fn submit(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<SubmitReport, BookError> {
        if quantity == 0 {
            return Err(BookError::InvalidQuantity);
        }

        let id = self.ids.next_id();
        if self.bids.contains(&id) || self.asks.contains(&id) {
            return Err(BookError::DuplicateOrderId { id });
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let mut order = Order::new(id, side, price, quantity, sequence);
        let trades = self.match_order(&mut order);

        let report = SubmitReport {
            order_id: order.id.clone(),
            trades,
            resting_quantity: order.quantity,
        };

        if !order.is_filled() {
            debug!(
                order_id = %order.id,
                %side,
                price,
                quantity = order.quantity,
                "order resting"
            );
            self.side_mut(side).insert(order);
        }

        Ok(report)
    }

    /// Cancel a resting order.
    ///
    /// Only `side` is searched. Returns the removed order; on
    /// `OrderNotFound` the book is untouched.
    pub fn cancel(&mut self, order_id: &OrderId, side: Side) -> Result<Order, BookError> {
        let order = self.side_mut(side).remove_by_id(order_id)?;
        debug!(order_id = %order.id, %side, quantity = order.quantity, "order cancelled");
        Ok(order)
    }

    /// Process a single request and return its response.
    pub fn process(&mut self, request: Request) -> Response {
        match request {
            Request::Submit {
                side,
                price,
                quantity,
            } => self.submit(side, price, quantity).into(),
            Request::Cancel { order_id, side } => self.cancel(&order_id, side).into(),
            Request::TopOfBook => Response::TopOfBook(self.top_of_book()),
            Request::Depth { levels } => Response::Depth(self.depth(levels)),
        }
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    /// Match an incoming order against the opposite side of the book.
    ///
    /// Fills reduce `order.quantity` in place; the remainder is left for
    /// the caller to rest.
    fn match_order(&mut self, order: &mut Order) -> Vec<Trade> {
        let mut trades = Vec::new();
        let opposite = match order.side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };

        while !order.is_filled() {
            let Some(best) = opposite.peek_best() else {
                break;
            };
            if !order.crosses(best.price) {
                break;
            }

            let trade = Trade {
                maker_order_id: best.id.clone(),
                price: best.price,
                quantity: order.quantity.min(best.quantity),
            };
            let maker_left = best.quantity - trade.quantity;

            order.fill(trade.quantity);
            if maker_left == 0 {
                opposite.pop_best();
            } else {
                opposite.adjust_best_quantity(maker_left);
            }

            debug!(
                taker = %order.id,
                maker = %trade.maker_order_id,
                price = trade.price,
                quantity = trade.quantity,
                "trade executed"
            );
            trades.push(trade);
        }

        trades
    }
}

impl<G> OrderBook<G> {
    /// The resting orders of one side.
    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Best bid price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.peek_best().map(|o| o.price)
    }

    /// Best ask price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.peek_best().map(|o| o.price)
    }

    /// `best ask - best bid`; `None` if a side is empty or the difference
    /// does not fit in a `Price`.
    pub fn spread(&self) -> Option<Price> {
        self.best_ask()?.checked_sub(self.best_bid()?)
    }

    /// Return a snapshot of the current top-of-book.
    pub fn top_of_book(&self) -> TopOfBookSnapshot {
        TopOfBookSnapshot::new(self.bids.best_level(), self.asks.best_level())
    }

    /// Up to `levels` aggregated price levels per side.
    pub fn depth(&self, levels: usize) -> DepthSnapshot {
        DepthSnapshot {
            bids: self.bids.levels(levels),
            asks: self.asks.levels(levels),
        }
    }

    /// Copies of one side's orders, best first.
    pub fn resting_orders(&self, side: Side) -> Vec<Order> {
        self.side(side).iter().cloned().collect()
    }

    pub fn get_order(&self, order_id: &OrderId, side: Side) -> Option<&Order> {
        self.side(side).get(order_id)
    }

    /// Number of resting orders on both sides.
    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// `true` if best bid >= best ask. Never the case between operations.
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_bid(), self.best_ask()), (Some(bid), Some(ask)) if bid >= ask)
    }

    /// Remove every resting order. Sequence numbering continues.
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_gen::SequentialIdGenerator;
    use crate::top_of_book::PriceLevel;

    fn book() -> OrderBook<SequentialIdGenerator> {
        OrderBook::with_id_generator(SequentialIdGenerator::default())
    }

    #[test]
    fn non_crossing_orders_rest() {
        let mut book = book();
        let bid = book.submit(Side::Buy, 99, 5).unwrap();
        let ask = book.submit(Side::Sell, 101, 7).unwrap();

        assert!(bid.trades.is_empty());
        assert_eq!(bid.resting_quantity, 5);
        assert!(ask.trades.is_empty());
        assert_eq!(book.best_bid(), Some(99));
        assert_eq!(book.best_ask(), Some(101));
        assert_eq!(book.spread(), Some(2));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn sweeps_several_levels_at_maker_prices() {
        let mut book = book();
        book.submit(Side::Sell, 101, 3).unwrap();
        book.submit(Side::Sell, 100, 2).unwrap();
        book.submit(Side::Sell, 103, 10).unwrap();

        let report = book.submit(Side::Buy, 102, 10).unwrap();
        let fills: Vec<(Price, Quantity)> =
            report.trades.iter().map(|t| (t.price, t.quantity)).collect();

        assert_eq!(fills, vec![(100, 2), (101, 3)]);
        assert_eq!(report.resting_quantity, 5);
        assert_eq!(book.best_bid(), Some(102));
        assert_eq!(book.best_ask(), Some(103));
        assert!(!book.is_crossed());
    }

    #[test]
    fn equal_price_fills_in_arrival_order() {
        let mut book = book();
        let first = book.submit(Side::Buy, 100, 3).unwrap().order_id;
        let second = book.submit(Side::Buy, 100, 3).unwrap().order_id;

        let report = book.submit(Side::Sell, 100, 4).unwrap();
        assert_eq!(report.trades[0].maker_order_id, first);
        assert_eq!(report.trades[0].quantity, 3);
        assert_eq!(report.trades[1].maker_order_id, second);
        assert_eq!(report.trades[1].quantity, 1);
        assert_eq!(book.get_order(&second, Side::Buy).map(|o| o.quantity), Some(2));
    }

    #[test]
    fn fully_filled_incoming_does_not_rest() {
        let mut book = book();
        book.submit(Side::Sell, 100, 10).unwrap();
        let report = book.submit(Side::Buy, 105, 10).unwrap();

        assert!(report.is_fully_filled());
        assert_eq!(report.filled_quantity(), 10);
        assert!(book.is_empty());
        assert!(book.get_order(&report.order_id, Side::Buy).is_none());
    }

    #[test]
    fn zero_quantity_consumes_no_id() {
        let mut book = book();
        assert_eq!(book.submit(Side::Buy, 100, 0), Err(BookError::InvalidQuantity));
        let report = book.submit(Side::Buy, 100, 1).unwrap();
        assert_eq!(report.order_id.as_str(), "ord-1");
    }

    #[test]
    fn cancel_searches_only_the_named_side() {
        let mut book = book();
        let id = book.submit(Side::Buy, 100, 5).unwrap().order_id;

        assert_eq!(
            book.cancel(&id, Side::Sell),
            Err(BookError::OrderNotFound {
                id: id.clone(),
                side: Side::Sell,
            })
        );
        let removed = book.cancel(&id, Side::Buy).unwrap();
        assert_eq!(removed.quantity, 5);
        assert!(book.is_empty());
    }

    #[test]
    fn cancelled_order_cannot_be_cancelled_again() {
        let mut book = book();
        let id = book.submit(Side::Sell, 100, 5).unwrap().order_id;
        book.cancel(&id, Side::Sell).unwrap();
        assert!(book.cancel(&id, Side::Sell).is_err());
    }

    #[test]
    fn top_of_book_and_depth_aggregate() {
        let mut book = book();
        book.submit(Side::Buy, 99, 1).unwrap();
        book.submit(Side::Buy, 99, 2).unwrap();
        book.submit(Side::Buy, 98, 4).unwrap();
        book.submit(Side::Sell, 101, 5).unwrap();

        let tob = book.top_of_book();
        assert_eq!(tob.bid, Some(PriceLevel::new(99, 3, 2)));
        assert_eq!(tob.ask, Some(PriceLevel::new(101, 5, 1)));
        assert_eq!(tob.spread(), Some(2));

        let depth = book.depth(5);
        assert_eq!(depth.bids.len(), 2);
        assert_eq!(depth.asks.len(), 1);
    }

    #[test]
    fn process_dispatches_requests() {
        let mut book = book();
        let response = book.process(Request::Submit {
            side: Side::Sell,
            price: 10,
            quantity: 1,
        });
        let report = match response {
            Response::Submitted(report) => report,
            other => panic!("expected Submitted, got {other:?}"),
        };

        let response = book.process(Request::Cancel {
            order_id: report.order_id.clone(),
            side: Side::Sell,
        });
        assert!(matches!(response, Response::Cancelled(ref o) if o.id == report.order_id));

        assert_eq!(
            book.process(Request::Submit {
                side: Side::Buy,
                price: 10,
                quantity: 0,
            }),
            Response::Rejected(BookError::InvalidQuantity)
        );
        assert_eq!(
            book.process(Request::TopOfBook),
            Response::TopOfBook(TopOfBookSnapshot::default())
        );
    }

    #[test]
    fn clear_empties_both_sides() {
        let mut book = book();
        book.submit(Side::Buy, 1, 1).unwrap();
        book.submit(Side::Sell, 2, 1).unwrap();
        book.clear();
        assert!(book.is_empty());
        assert!(book.top_of_book().is_empty());
    }

    #[test]
    fn spread_too_wide_for_a_price_is_none() {
        let mut book = book();
        book.submit(Side::Buy, -10, 1).unwrap();
        book.submit(Side::Sell, i64::MAX, 1).unwrap();

        assert_eq!(book.spread(), None);
        assert_eq!(book.top_of_book().spread(), None);
        assert!(!book.is_crossed());
    }

    #[test]
    fn huge_resting_quantities_still_answer_queries() {
        let big = i64::MAX as Quantity;
        let mut book = book();
        for _ in 0..3 {
            book.submit(Side::Buy, 100, big).unwrap();
        }

        let tob = book.top_of_book();
        assert_eq!(tob.bid, Some(PriceLevel::new(100, Quantity::MAX, 3)));
        assert_eq!(book.depth(5).bids, vec![PriceLevel::new(100, Quantity::MAX, 3)]);
    }

    #[test]
    fn repeated_id_is_rejected_without_touching_the_book() {
        let mut book = OrderBook::with_id_generator(|| OrderId::from("same"));
        book.submit(Side::Sell, 100, 5).unwrap();

        assert_eq!(
            book.submit(Side::Buy, 100, 3),
            Err(BookError::DuplicateOrderId {
                id: OrderId::from("same"),
            })
        );
        assert_eq!(book.len(), 1);
        let id = OrderId::from("same");
        assert_eq!(book.get_order(&id, Side::Sell).map(|o| o.quantity), Some(5));
        assert_eq!(book.cancel(&id, Side::Sell).map(|o| o.quantity), Ok(5));
        assert!(book.is_empty());
    }
}

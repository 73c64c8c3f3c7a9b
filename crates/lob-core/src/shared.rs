//! Thread-safe handle to a single order book.
//!
//! Every call takes one exclusive lock for its whole duration, so
//! submits and cancels from different threads are applied one at a
//! time and never interleave inside the matching loop.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::BookError;
use crate::id_gen::{IdGenerator, UuidGenerator};
use crate::messages::{Request, Response, SubmitReport};
use crate::order::{Order, OrderId, Price, Quantity};
use crate::order_book::OrderBook;
use crate::side::Side;
use crate::top_of_book::{DepthSnapshot, TopOfBookSnapshot};

/// Cloneable, lock-protected [`OrderBook`].
#[derive(Debug)]
pub struct SharedOrderBook<G = UuidGenerator> {
    inner: Arc<Mutex<OrderBook<G>>>,
}

impl<G> Clone for SharedOrderBook<G> {
    fn clone(&self) -> Self {
        SharedOrderBook {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedOrderBook<UuidGenerator> {
    pub fn new() -> Self {
        SharedOrderBook::from_book(OrderBook::new())
    }
}

impl Default for SharedOrderBook<UuidGenerator> {
    fn default() -> Self {
        SharedOrderBook::new()
    }
}

impl<G: IdGenerator> SharedOrderBook<G> {
    pub fn from_book(book: OrderBook<G>) -> Self {
        SharedOrderBook {
            inner: Arc::new(Mutex::new(book)),
        }
    }

    pub fn submit(
        &self,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<SubmitReport, BookError> {
        self.inner.lock().submit(side, price, quantity)
    }

    pub fn cancel(&self, order_id: &OrderId, side: Side) -> Result<Order, BookError> {
        self.inner.lock().cancel(order_id, side)
    }

    pub fn process(&self, request: Request) -> Response {
        self.inner.lock().process(request)
    }

    pub fn top_of_book(&self) -> TopOfBookSnapshot {
        self.inner.lock().top_of_book()
    }

    pub fn depth(&self, levels: usize) -> DepthSnapshot {
        self.inner.lock().depth(levels)
    }

    /// Run `f` against the book while holding the lock.
    pub fn with_book<R>(&self, f: impl FnOnce(&OrderBook<G>) -> R) -> R {
        f(&self.inner.lock())
    }
}

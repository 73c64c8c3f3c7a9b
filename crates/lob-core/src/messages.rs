//! Message types used by the order book.
//!
//! These are **transport-agnostic** logical messages:
//! - [`Request`]: what the book consumes.
//! - [`Response`]: what the book produces for that request.
//!
//! Note: JSON / CSV encoders live in the `lob-protocol` crate;
//! this module is purely logical.

use crate::error::BookError;
use crate::order::{Order, OrderId, Price, Quantity};
use crate::side::Side;
use crate::top_of_book::{DepthSnapshot, TopOfBookSnapshot};

/// A request into the order book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// New limit order.
    Submit {
        side: Side,
        price: Price,
        quantity: Quantity,
    },

    /// Cancel a resting order on the given side.
    Cancel { order_id: OrderId, side: Side },

    /// Best bid / best ask.
    TopOfBook,

    /// Aggregated price levels, up to `levels` per side.
    Depth { levels: usize },
}

/// The book's answer to one [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Submitted(SubmitReport),

    /// The order that was removed.
    Cancelled(Order),

    TopOfBook(TopOfBookSnapshot),

    Depth(DepthSnapshot),

    /// The request failed; the book is unchanged.
    Rejected(BookError),
}

/// One execution between the incoming order and a resting one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    /// The resting order that supplied the liquidity.
    pub maker_order_id: OrderId,

    /// Execution price, always the maker's limit price.
    pub price: Price,

    pub quantity: Quantity,
}

/// Outcome of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub order_id: OrderId,

    /// Executions in the order they happened.
    pub trades: Vec<Trade>,

    /// Quantity left resting on the book; `0` when fully filled.
    pub resting_quantity: Quantity,
}

impl SubmitReport {
    pub fn filled_quantity(&self) -> Quantity {
        self.trades.iter().map(|t| t.quantity).sum()
    }

    pub fn is_fully_filled(&self) -> bool {
        self.resting_quantity == 0
    }
}

impl From<Result<SubmitReport, BookError>> for Response {
    fn from(result: Result<SubmitReport, BookError>) -> Self {
        match result {
            Ok(report) => Response::Submitted(report),
            Err(err) => Response::Rejected(err),
        }
    }
}

impl From<Result<Order, BookError>> for Response {
    fn from(result: Result<Order, BookError>) -> Self {
        match result {
            Ok(order) => Response::Cancelled(order),
            Err(err) => Response::Rejected(err),
        }
    }
}

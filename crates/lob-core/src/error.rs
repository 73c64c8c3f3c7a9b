//! Error types for the order book.
//!
//! All failures are local and recoverable: the operation that reports
//! one has left the book exactly as it found it.

use thiserror::Error;

use crate::order::OrderId;
use crate::side::Side;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// A submitted order had no quantity.
    #[error("invalid quantity: orders must have a quantity greater than zero")]
    InvalidQuantity,

    /// Cancel (or lookup) targeted an id that is not resting on that side.
    #[error("order {id} not found on {side} side")]
    OrderNotFound { id: OrderId, side: Side },

    /// The id generator produced an id that is already resting.
    #[error("order id {id} is already resting on the book")]
    DuplicateOrderId { id: OrderId },
}

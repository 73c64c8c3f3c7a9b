//! lob-core
//!
//! Pure order book logic:
//! - messages (request/response types)
//! - order representation and id generation
//! - per-side price-time priority structure
//! - the order book itself (matching, cancellation, queries)
//! - a lock-protected shared handle

pub mod side;
pub mod order;
pub mod id_gen;
pub mod book_side;
pub mod messages;
pub mod order_book;
pub mod shared;
pub mod error;
pub mod top_of_book;

pub use side::Side;

pub use messages::{Request, Response, SubmitReport, Trade};

pub use order::{Order, OrderId, Price, Quantity};
pub use id_gen::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use book_side::BookSide;
pub use order_book::OrderBook;
pub use shared::SharedOrderBook;
pub use error::BookError;
pub use top_of_book::{DepthSnapshot, PriceLevel, TopOfBookSnapshot};

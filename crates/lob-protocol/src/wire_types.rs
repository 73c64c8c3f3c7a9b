//! Wire-level types shared by the codecs.
//!
//! This module defines:
//! - the JSON request/response bodies (serde types),
//! - side-name parsing,
//! - the mapping from signed wire quantities to core quantities.
//!
//! The actual encode/decode logic lives in `json_codec` / `csv_codec`.

use lob_core::{Price, Quantity, Side};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ProtocolError};

/// Depth returned when a depth request does not say how many levels.
pub const DEFAULT_DEPTH_LEVELS: usize = 10;

fn default_levels() -> usize {
    DEFAULT_DEPTH_LEVELS
}

/// JSON request body (client → server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireRequest {
    Submit {
        side: String,
        price: Price,
        /// Signed on the wire; non-positive values are rejected by the book.
        quantity: i64,
    },
    Cancel {
        order_id: String,
        side: String,
    },
    TopOfBook,
    Depth {
        #[serde(default = "default_levels")]
        levels: usize,
    },
}

/// JSON response body (server → client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireResponse {
    Submitted {
        order_id: String,
        trades: Vec<WireTrade>,
        resting_quantity: Quantity,
    },
    Cancelled {
        order_id: String,
        side: String,
        quantity: Quantity,
    },
    TopOfBook {
        bid: Option<WireLevel>,
        ask: Option<WireLevel>,
    },
    Depth {
        bids: Vec<WireLevel>,
        asks: Vec<WireLevel>,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTrade {
    pub maker_order_id: String,
    pub price: Price,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLevel {
    pub price: Price,
    pub quantity: Quantity,
    pub orders: usize,
}

/// Parse `buy` / `sell`, ignoring ASCII case.
pub fn parse_side_name(s: &str) -> Result<Side, ProtocolError> {
    if s.eq_ignore_ascii_case("buy") {
        Ok(Side::Buy)
    } else if s.eq_ignore_ascii_case("sell") {
        Ok(Side::Sell)
    } else {
        Err(ProtocolError::InvalidSide(s.to_string()))
    }
}

/// Parse the CSV side token (`B` / `S`).
pub fn parse_side_char(s: &str) -> Result<Side, ProtocolError> {
    let mut chars = s.chars();
    match (chars.next().and_then(Side::from_char), chars.next()) {
        (Some(side), None) => Ok(side),
        _ => Err(ProtocolError::InvalidSide(s.to_string())),
    }
}

/// Map a signed wire quantity onto the book's unsigned quantity.
///
/// Negative quantities become `0`, which the book rejects with
/// `InvalidQuantity` like any other non-positive quantity.
pub fn quantity_from_wire(quantity: i64) -> Quantity {
    Quantity::try_from(quantity).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_names_are_case_insensitive() {
        assert_eq!(parse_side_name("buy").unwrap(), Side::Buy);
        assert_eq!(parse_side_name("SELL").unwrap(), Side::Sell);
        assert!(matches!(
            parse_side_name("hold"),
            Err(ProtocolError::InvalidSide(ref s)) if s == "hold"
        ));
    }

    #[test]
    fn side_chars_must_be_single() {
        assert_eq!(parse_side_char("S").unwrap(), Side::Sell);
        assert!(parse_side_char("SS").is_err());
        assert!(parse_side_char("").is_err());
    }

    #[test]
    fn negative_quantities_map_to_zero() {
        assert_eq!(quantity_from_wire(-5), 0);
        assert_eq!(quantity_from_wire(7), 7);
    }
}

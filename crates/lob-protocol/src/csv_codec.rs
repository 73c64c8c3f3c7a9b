// crates/lob-protocol/src/csv_codec.rs

//! CSV line codec.
//!
//! Handy with netcat and for scripted replay in tests.
//!
//! Input format (lines → `Request`):
//!
//! - Submit:
//!   `N, side(char B or S), price(int), qty(int)`
//!
//! - Cancel:
//!   `C, orderId(string), side(char B or S)`
//!
//! - Query top-of-book:
//!   `Q`
//!
//! - Query depth:
//!   `D, levels(int)`
//!
//! Output format (`Response` → lines):
//!
//! - Submit ack, then one line per trade:
//!   `A, orderId, restingQty`
//!   `T, makerOrderId, price, quantity`
//!
//! - Cancel ack:
//!   `X, orderId, side, cancelledQty`
//!
//! - Top of book, one line per side:
//!   `B, side(B/S), price, totalQuantity`  or  `B, side(B/S), -, -`
//!
//! - Depth, one line per level (bids first):
//!   `L, side(B/S), price, totalQuantity, orderCount`
//!
//! - Error:
//!   `E, kind, message`

use lob_core::{OrderId, Request, Response, Side};

use crate::error::{ErrorKind, ProtocolError};
use crate::wire_types::{parse_side_char, quantity_from_wire};

/// Parse a single CSV line into a `Request`.
///
/// Returns `Ok(None)` for blank lines or comments (starting with `#`).
pub fn parse_input_line(line: &str) -> Result<Option<Request>, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let tokens = split_and_trim(trimmed, ',');

    let request = match tokens[0] {
        "N" => parse_submit(&tokens)?,
        "C" => parse_cancel(&tokens)?,
        "Q" => {
            expect_fields("top-of-book query", &tokens, 1)?;
            Request::TopOfBook
        }
        "D" => {
            expect_fields("depth query", &tokens, 2)?;
            Request::Depth {
                levels: parse_int("levels", tokens[1])?,
            }
        }
        other => return Err(ProtocolError::UnknownMessageType(other.to_string())),
    };

    Ok(Some(request))
}

fn parse_submit(tokens: &[&str]) -> Result<Request, ProtocolError> {
    // N, side, price, qty
    expect_fields("new order", tokens, 4)?;

    let side = parse_side_char(tokens[1])?;
    let price = parse_int("price", tokens[2])?;
    let quantity: i64 = parse_int("quantity", tokens[3])?;

    Ok(Request::Submit {
        side,
        price,
        quantity: quantity_from_wire(quantity),
    })
}

fn parse_cancel(tokens: &[&str]) -> Result<Request, ProtocolError> {
    // C, orderId, side
    expect_fields("cancel", tokens, 3)?;

    Ok(Request::Cancel {
        order_id: OrderId::new(tokens[1]),
        side: parse_side_char(tokens[2])?,
    })
}

/// Format a `Response` as CSV lines.
pub fn format_response(response: &Response) -> Vec<String> {
    match response {
        Response::Submitted(report) => {
            let mut lines = Vec::with_capacity(report.trades.len() + 1);
            lines.push(format!("A, {}, {}", report.order_id, report.resting_quantity));
            for t in &report.trades {
                lines.push(format!("T, {}, {}, {}", t.maker_order_id, t.price, t.quantity));
            }
            lines
        }
        Response::Cancelled(order) => vec![format!(
            "X, {}, {}, {}",
            order.id,
            order.side.as_char(),
            order.quantity
        )],
        Response::TopOfBook(tob) => vec![
            format_top_line(Side::Buy, tob.bid.map(|l| (l.price, l.quantity))),
            format_top_line(Side::Sell, tob.ask.map(|l| (l.price, l.quantity))),
        ],
        Response::Depth(depth) => {
            let bids = depth.bids.iter().map(|l| (Side::Buy, l));
            let asks = depth.asks.iter().map(|l| (Side::Sell, l));
            bids.chain(asks)
                .map(|(side, l)| {
                    format!(
                        "L, {}, {}, {}, {}",
                        side.as_char(),
                        l.price,
                        l.quantity,
                        l.order_count
                    )
                })
                .collect()
        }
        Response::Rejected(err) => vec![format_error(ErrorKind::from(err), &err.to_string())],
    }
}

/// Format a request-level failure as a CSV error line.
pub fn format_protocol_error(err: &ProtocolError) -> String {
    format_error(ErrorKind::from(err), &err.to_string())
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn format_top_line(side: Side, level: Option<(i64, u64)>) -> String {
    match level {
        Some((price, quantity)) => format!("B, {}, {}, {}", side.as_char(), price, quantity),
        None => format!("B, {}, -, -", side.as_char()),
    }
}

fn format_error(kind: ErrorKind, message: &str) -> String {
    // Commas would split the message into extra fields.
    format!("E, {}, {}", kind.as_str(), message.replace(',', ";"))
}

fn split_and_trim(s: &str, delimiter: char) -> Vec<&str> {
    s.split(delimiter).map(str::trim).collect()
}

fn expect_fields(message: &'static str, tokens: &[&str], expected: usize) -> Result<(), ProtocolError> {
    if tokens.len() == expected {
        Ok(())
    } else {
        Err(ProtocolError::FieldCount {
            message,
            expected,
            actual: tokens.len(),
        })
    }
}

fn parse_int<T: std::str::FromStr>(field: &'static str, s: &str) -> Result<T, ProtocolError> {
    s.parse::<T>().map_err(|_| ProtocolError::InvalidField {
        field,
        value: s.to_string(),
    })
}

//! JSON line codec.
//!
//! One JSON object per line. Request bodies follow the shape of the
//! original HTTP front end (`{price, quantity, side}` in, `{order_id}`
//! out) with a `type` tag added so one connection can carry every
//! request kind:
//!
//! ```text
//! {"type":"submit","side":"buy","price":100,"quantity":10}
//! {"type":"cancel","order_id":"…","side":"sell"}
//! {"type":"top_of_book"}
//! {"type":"depth","levels":5}
//! ```

use lob_core::{OrderId, PriceLevel, Request, Response};

use crate::error::{ErrorKind, ProtocolError};
use crate::wire_types::{
    parse_side_name, quantity_from_wire, WireLevel, WireRequest, WireResponse, WireTrade,
};

/// Decode one JSON request line.
pub fn decode_request(line: &str) -> Result<Request, ProtocolError> {
    let wire: WireRequest = serde_json::from_str(line.trim())?;

    let request = match wire {
        WireRequest::Submit {
            side,
            price,
            quantity,
        } => Request::Submit {
            side: parse_side_name(&side)?,
            price,
            quantity: quantity_from_wire(quantity),
        },
        WireRequest::Cancel { order_id, side } => Request::Cancel {
            order_id: OrderId::new(order_id),
            side: parse_side_name(&side)?,
        },
        WireRequest::TopOfBook => Request::TopOfBook,
        WireRequest::Depth { levels } => Request::Depth { levels },
    };

    Ok(request)
}

/// Encode a request as a JSON line (without the trailing newline).
pub fn encode_request(request: &Request) -> Result<String, ProtocolError> {
    let wire = match request {
        Request::Submit {
            side,
            price,
            quantity,
        } => WireRequest::Submit {
            side: side.as_str().to_string(),
            price: *price,
            quantity: i64::try_from(*quantity).unwrap_or(i64::MAX),
        },
        Request::Cancel { order_id, side } => WireRequest::Cancel {
            order_id: order_id.to_string(),
            side: side.as_str().to_string(),
        },
        Request::TopOfBook => WireRequest::TopOfBook,
        Request::Depth { levels } => WireRequest::Depth { levels: *levels },
    };
    Ok(serde_json::to_string(&wire)?)
}

/// Convert a book response into its JSON body.
pub fn to_wire_response(response: &Response) -> WireResponse {
    match response {
        Response::Submitted(report) => WireResponse::Submitted {
            order_id: report.order_id.to_string(),
            trades: report
                .trades
                .iter()
                .map(|t| WireTrade {
                    maker_order_id: t.maker_order_id.to_string(),
                    price: t.price,
                    quantity: t.quantity,
                })
                .collect(),
            resting_quantity: report.resting_quantity,
        },
        Response::Cancelled(order) => WireResponse::Cancelled {
            order_id: order.id.to_string(),
            side: order.side.as_str().to_string(),
            quantity: order.quantity,
        },
        Response::TopOfBook(tob) => WireResponse::TopOfBook {
            bid: tob.bid.map(wire_level),
            ask: tob.ask.map(wire_level),
        },
        Response::Depth(depth) => WireResponse::Depth {
            bids: depth.bids.iter().copied().map(wire_level).collect(),
            asks: depth.asks.iter().copied().map(wire_level).collect(),
        },
        Response::Rejected(err) => WireResponse::Error {
            kind: ErrorKind::from(err),
            message: err.to_string(),
        },
    }
}

/// Encode a book response as a JSON line.
pub fn encode_response(response: &Response) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&to_wire_response(response))?)
}

/// Encode a request-level failure as a JSON error line.
pub fn encode_protocol_error(err: &ProtocolError) -> Result<String, ProtocolError> {
    let wire = WireResponse::Error {
        kind: ErrorKind::from(err),
        message: err.to_string(),
    };
    Ok(serde_json::to_string(&wire)?)
}

/// Decode a JSON response line (client side).
pub fn decode_response(line: &str) -> Result<WireResponse, ProtocolError> {
    Ok(serde_json::from_str(line.trim())?)
}

fn wire_level(level: PriceLevel) -> WireLevel {
    WireLevel {
        price: level.price,
        quantity: level.quantity,
        orders: level.order_count,
    }
}

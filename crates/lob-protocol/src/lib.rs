//! lob-protocol
//!
//! Line-oriented wire encoding/decoding for the order book.
//!
//! This crate is responsible for turning logical book messages
//! (`lob_core::Request` / `Response`) into text lines and back again.
//!
//! - [`json_codec`] : one JSON object per line
//! - [`csv_codec`]  : CSV compatibility (for netcat / replay)

pub mod error;
pub mod wire_types;
pub mod json_codec;
pub mod csv_codec;

pub use error::{ErrorKind, ProtocolError};
pub use wire_types::{WireLevel, WireRequest, WireResponse, WireTrade};

/// Line protocol spoken on one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineProtocol {
    Json,
    Csv,
}

impl LineProtocol {
    /// Pick the protocol from the first non-blank line a client sends:
    /// `{` starts a JSON object, anything else is CSV.
    pub fn detect(line: &str) -> Self {
        if line.trim_start().starts_with('{') {
            LineProtocol::Json
        } else {
            LineProtocol::Csv
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_json_by_opening_brace() {
        assert_eq!(LineProtocol::detect("  {\"type\":\"top_of_book\"}"), LineProtocol::Json);
        assert_eq!(LineProtocol::detect("N, B, 100, 1"), LineProtocol::Csv);
    }
}

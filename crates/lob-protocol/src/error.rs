//! Protocol-level errors and the error kinds reported on the wire.

use lob_core::BookError;
use thiserror::Error;

/// A request line that could not be turned into a [`lob_core::Request`].
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Malformed JSON or a JSON body with the wrong shape.
    #[error("invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown CSV message type.
    #[error("unknown message type: {0:?}")]
    UnknownMessageType(String),

    /// Wrong number of CSV fields for the message type.
    #[error("expected {expected} fields for {message}, got {actual}")]
    FieldCount {
        message: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Side string other than buy/sell (JSON) or B/S (CSV).
    #[error("invalid side: {0:?}")]
    InvalidSide(String),

    /// A field that should be an integer was not.
    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// Error category carried by error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidQuantity,
    OrderNotFound,
    DuplicateOrderId,
    BadRequest,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidQuantity => "invalid_quantity",
            ErrorKind::OrderNotFound => "order_not_found",
            ErrorKind::DuplicateOrderId => "duplicate_order_id",
            ErrorKind::BadRequest => "bad_request",
        }
    }
}

impl From<&BookError> for ErrorKind {
    fn from(err: &BookError) -> Self {
        match err {
            BookError::InvalidQuantity => ErrorKind::InvalidQuantity,
            BookError::OrderNotFound { .. } => ErrorKind::OrderNotFound,
            BookError::DuplicateOrderId { .. } => ErrorKind::DuplicateOrderId,
        }
    }
}

impl From<&ProtocolError> for ErrorKind {
    fn from(_: &ProtocolError) -> Self {
        ErrorKind::BadRequest
    }
}

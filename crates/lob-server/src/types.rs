//! Shared types for the order book TCP server.
//!
//! This module defines:
//! - `ClientId`: a lightweight handle for connected clients
//! - `EngineCommand`: a request plus the channel its response goes back on
//! - channel aliases between clients and the engine loop

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use lob_core::{Request, Response};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, RwLock};

/// Identifier for a connected client.
///
/// This is intentionally opaque; we just guarantee uniqueness
/// over the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

/// Registry of connected clients and their peer addresses.
pub type ClientRegistry = Arc<RwLock<HashMap<ClientId, SocketAddr>>>;

/// One unit of work for the engine task.
#[derive(Debug)]
pub struct EngineCommand {
    pub request: Request,
    pub reply: oneshot::Sender<Response>,
}

/// Channel from clients → engine task.
pub type EngineTx = mpsc::Sender<EngineCommand>;
pub type EngineRx = mpsc::Receiver<EngineCommand>;

/// Failure to get an answer out of the engine task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine task is gone, so the request could not be served.
    #[error("order book engine is not running")]
    Closed,

    /// The engine answered with a response of the wrong kind.
    #[error("engine answered a {request} request with an unexpected response")]
    UnexpectedResponse { request: &'static str },
}

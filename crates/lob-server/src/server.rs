//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured address/port.
//! - Spawns the single engine task that owns the `OrderBook`.
//! - Accepts new TCP connections, assigns each a `ClientId`, and
//!   spawns a per-client task to handle its I/O.
//!
//! The per-client logic and engine loop live in `client` and
//! `engine_task` respectively.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use lob_core::OrderBook;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::client;
use crate::config::Config;
use crate::engine_task::EngineHandle;
use crate::types::{ClientId, ClientRegistry};

/// Global-ish counter for assigning unique `ClientId`s.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ClientId {
    let id = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed);
    ClientId(id)
}

/// Bind the configured address and serve until the listener fails.
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    serve(listener, config).await
}

/// Serve connections from an already-bound listener.
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    let (engine, _engine_task) = EngineHandle::spawn(OrderBook::new(), config.queue_capacity);

    // Shared registry of connected clients.
    let clients: ClientRegistry = Arc::new(tokio::sync::RwLock::new(Default::default()));

    loop {
        let (stream, peer_addr) = listener.accept().await.context("accept failed")?;

        let client_id = {
            let mut guard = clients.write().await;
            if guard.len() >= config.max_clients {
                warn!(
                    %peer_addr,
                    max_clients = config.max_clients,
                    "rejecting connection: max_clients reached"
                );
                // Just drop the stream; client will see the connection closed.
                continue;
            }
            let client_id = next_client_id();
            guard.insert(client_id, peer_addr);
            client_id
        };
        info!(client = client_id.0, %peer_addr, "accepted connection");

        let engine = engine.clone();
        let clients = clients.clone();

        tokio::spawn(async move {
            match client::run_client(client_id, stream, engine, clients).await {
                Ok(()) => info!(client = client_id.0, "client disconnected"),
                Err(e) => warn!(client = client_id.0, error = %e, "client error"),
            }
        });
    }
}

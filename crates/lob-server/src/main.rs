//! Line-protocol TCP server for the order book.

use anyhow::Result;
use clap::Parser;
use lob_server::config::Config;
use lob_server::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();

    info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        max_clients = config.max_clients,
        queue_capacity = config.queue_capacity,
        "starting lob-server"
    );

    server::run(config).await
}

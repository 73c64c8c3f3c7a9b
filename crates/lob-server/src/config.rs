//! Configuration for the order book TCP server.
//!
//! Every setting can come from a command-line flag or an environment
//! variable (flags win), falling back to defaults:
//!
//! - `LOB_BIND_ADDR`      (default: "0.0.0.0")
//! - `LOB_PORT`           (default: "9000")
//! - `LOB_MAX_CLIENTS`    (default: "1024")
//! - `LOB_QUEUE_CAPACITY` (default: "4096")

use anyhow::{ensure, Result};
use clap::Parser;

/// Server configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "lob-server", about = "Limit order book over TCP (JSON or CSV lines)")]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    #[arg(long, env = "LOB_BIND_ADDR", default_value = "0.0.0.0")]
    pub bind_addr: String,

    /// TCP port to listen on.
    #[arg(short, long, env = "LOB_PORT", default_value_t = 9000)]
    pub port: u16,

    /// Maximum number of simultaneously connected clients.
    #[arg(long, env = "LOB_MAX_CLIENTS", default_value_t = 1024)]
    pub max_clients: usize,

    /// Pending requests the engine queue holds before senders wait.
    #[arg(long, env = "LOB_QUEUE_CAPACITY", default_value_t = 4096)]
    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 9000,
            max_clients: 1024,
            queue_capacity: 4096,
        }
    }
}

impl Config {
    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_clients > 0, "max_clients must be at least 1");
        ensure!(self.queue_capacity > 0, "queue_capacity must be at least 1");
        Ok(())
    }
}

//! lob-server
//!
//! Multi-client async TCP server for the order book.

pub mod config;
pub mod types;
pub mod server;
pub mod engine_task;

// internal module, not re-exported
mod client;

pub use config::Config;
pub use engine_task::EngineHandle;
pub use types::EngineError;

//! # Logging and Diagnostics
//!
//! - **File-based logging**: structured logs to `logs/dapp-client.log` (daily rotation)
//! - **Error aggregation**: recent absorbed failures, including activation errors
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dapp_client::debug::{self, DebugConfig};
//!
//! // Keep the guard alive until exit
//! let _guard = debug::init(&DebugConfig::from_env());
//!
//! tracing::info!(connector = "injected", "Attempting silent reconnection");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `dapp_client=debug,info`)
//! - `DAPP_LOG_DIR`: Log directory (default: `logs`)
//! - `DAPP_LOG_STDERR`: Mirror logs to stderr (1=on, 0=off)

pub mod config;
pub mod error_aggregator;
pub mod logger;

pub use config::DebugConfig;
pub use error_aggregator::{ErrorAggregator, ErrorEntry, ErrorLevel};

use tracing_appender::non_blocking::WorkerGuard;

/// Initialize logging. Call once at startup.
pub fn init(config: &DebugConfig) -> Option<WorkerGuard> {
    logger::init(config)
}

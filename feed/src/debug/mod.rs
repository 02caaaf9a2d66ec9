//! # Logging Infrastructure
//!
//! File-based structured logging for the feed client.
//!
//! ## Features
//!
//! - **File-based logging**: Logs to `logs/feed.log` (daily rotation)
//! - **JSON output**: Set `FEED_LOG_FORMAT=json` for one event per line
//! - **Panic capture**: Panics are written to the log before unwinding
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Initialize at startup, before anything logs
//! feed::debug::init();
//!
//! info!(post_id = %id, duration_ms = 234, "Like completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `feed=debug,info`)
//! - `FEED_LOG_DIR`: Log directory (default: `logs`)
//! - `FEED_LOG_FORMAT`: `text` (default) or `json`

pub mod config;
pub mod logger;

pub use config::{DebugConfig, LogFormat};
pub use logger::init as init_logger;

/// Initialize logging
///
/// Call this at application startup, before any other operations.
pub fn init() {
    init_logger();
}

//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and testability.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`FeedApi`,
//!   `ChannelConnector`, `Clipboard`, `LinkOpener`)
//!
//! ## Dependency Injection
//!
//! ```rust,ignore
//! use feed::core::service::FeedApi;
//!
//! // In production: the reqwest-backed client
//! let api: Arc<dyn FeedApi> = Arc::new(feed::services::api::ApiClient::new("http://localhost:4000"));
//!
//! // In tests: an in-memory mock
//! let api: Arc<dyn FeedApi> = Arc::new(MockFeedApi::with_posts(posts));
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{ChannelConnector, Clipboard, FeedApi, LinkOpener};

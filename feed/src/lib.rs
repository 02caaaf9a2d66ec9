//! # Social Feed Client - Library Root
//!
//! Client-side logic for a photo feed: listing posts, liking them (including
//! by double-tap), commenting, sharing links, searching profiles, and a live
//! unread-notification flag. This library crate contains all modules used by
//! the binary crate (`main.rs`); rendering is left to whatever consumes
//! [`app::FeedPage`] and its [`app::FeedEvent`] stream.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                 feed (this crate)                      │
//! ├────────────────────────────────────────────────────────┤
//! │  Tokio             - Async runtime                     │
//! │  Reqwest           - HTTP client                       │
//! │  tokio-tungstenite - Socket.IO notification channel    │
//! │  async-channel     - Event delivery to the renderer    │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP                         │ WebSocket
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  /api/posts     │          │   /socket.io/           │
//! │  /api/profile   │          │   "notification" events │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: The feed page and its components
//!   - `engine`: post collection, likes, comments, gestures
//!   - `notifications`: realtime channel lifecycle and unread flag
//!   - `profile`: profile search
//!   - `share`: share panel
//! - **config**: Endpoint configuration from the environment
//! - **core**: Error type and service traits
//! - **debug**: Logging setup
//! - **services**: External integrations
//!   - `api`: Backend HTTP client
//!   - `realtime`: Socket.IO channel
//!   - `session`: Persisted session reader
//!   - `share`: Clipboard and browser sinks
//! - **utils**: Input validation
//!
//! ### Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   ├── debug (logging)
//!   ├── config
//!   ├── services::session (who is signed in)
//!   │
//!   └── app::FeedPage
//!       ├── core::service traits
//!       │   ├── services::api (HTTP requests)
//!       │   ├── services::realtime (notifications)
//!       │   └── services::share (clipboard, browser)
//!       └── utils::validation
//! ```
//!
//! ## Core Concepts
//!
//! ### Backend Is the Source of Truth
//!
//! Every like or comment is answered with the full updated post, which
//! replaces the local copy. Counts are never adjusted locally.
//!
//! ### Event-Driven Updates
//!
//! Anything that changes without a direct call (a post reconciled after a
//! background like, the heart clearing, a notification arriving) is pushed
//! as a `FeedEvent` on an unbounded async channel.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use feed::app::{FeedPage, FeedServices};
//! use feed::config::FeedConfig;
//!
//! let config = FeedConfig::from_env();
//! let (mut page, events) = FeedPage::new(&config, session, FeedServices::production(&config));
//! page.activate().await?;
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p feed
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use app::{FeedEvent, FeedPage, FeedServices};
pub use config::FeedConfig;
pub use core::{AppError, Result};

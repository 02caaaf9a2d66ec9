//! # Services Module
//!
//! Integrations with everything outside the process.
//!
//! ```text
//! services/
//! ├── api/        - Backend REST client (posts, likes, comments, profiles)
//! ├── realtime/   - Socket.IO notification channel
//! ├── session.rs  - Persisted session reader
//! └── share.rs    - Clipboard and browser sinks
//! ```
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     FeedPage                            │
//! │  ┌──────────────┐  ┌────────────────┐  ┌────────────┐   │
//! │  │  ApiClient   │  │ SocketIo       │  │ Share      │   │
//! │  │  (api/)      │  │ Connector      │  │ sinks      │   │
//! │  └──────┬───────┘  └───────┬────────┘  └─────┬──────┘   │
//! └─────────┼──────────────────┼─────────────────┼──────────┘
//!           │ HTTP/JSON        │ WebSocket       │ OS
//!           ▼                  ▼                 ▼
//!   /api/posts/*         /socket.io/       browser, clipboard
//!   /api/profile/*
//! ```
//!
//! Every service sits behind a trait in [`crate::core::service`] so the app
//! layer can be tested against in-memory doubles.

pub mod api;
pub mod realtime;
pub mod session;
pub mod share;

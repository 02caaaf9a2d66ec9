//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged between the feed client and the backend REST API,
//! plus the persisted session record.
//!
//! ## Module Organization
//!
//! - [`feed`] - Posts, comments, like/comment request bodies
//! - [`profile`] - Profile lookup response
//! - [`session`] - Persisted identity record
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/posts/1/like
//! Content-Type: application/json
//!
//! { "username": "alice" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "id": "1",
//!   "username": "bob",
//!   "media": "/uploads/ghat.jpg",
//!   "caption": "Evening aarti",
//!   "likes": ["alice"],
//!   "comments": []
//! }
//! ```

pub mod feed;
pub mod profile;
pub mod session;

pub use feed::*;
pub use profile::*;
pub use session::*;

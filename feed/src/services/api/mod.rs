//! # Backend API Client Module
//!
//! HTTP client for the feed backend.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs      - Module exports
//! ├── client.rs   - ApiClient struct, response decoding, FeedApi impl
//! ├── posts.rs    - Feed listing, like, comment
//! └── profile.rs  - Profile lookup
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path | Body | Returns |
//! |---|---|---|---|
//! | GET | `/api/posts` | - | `Vec<Post>` |
//! | POST | `/api/posts/{id}/like` | `LikeRequest` | `Post` |
//! | POST | `/api/posts/{id}/comment` | `CommentRequest` | `Post` |
//! | GET | `/api/profile/{query}` | - | `Profile` or 404 |

pub mod client;
pub mod posts;
pub mod profile;

pub use client::ApiClient;

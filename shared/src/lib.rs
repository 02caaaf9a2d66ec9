//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the feed client and the backend API.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::feed`]**: Posts, comments and mutation request bodies
//!   - **[`dto::profile`]**: Profile lookup records
//!   - **[`dto::session`]**: The persisted signed-in user record
//! - **[`utils`]**: URL helpers shared by the client and anything rendering posts
//!   - **[`utils::join_url`]**: Join a base URL and a path
//!   - **[`utils::post_link`]**: Canonical shareable link for a post
//!
//! ## Wire Format
//!
//! - Field names are the backend's: `username`, `media`, `likes`, `comments`
//! - The session record uses camelCase (`followingList`) because the web login flow wrote it
//! - Ids are opaque; numeric ids are accepted and kept as strings
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shared::dto::feed::{LikeRequest, Post};
//!
//! # async fn run() -> Result<(), reqwest::Error> {
//! let post: Post = reqwest::Client::new()
//!     .post("http://localhost:4000/api/posts/1/like")
//!     .json(&LikeRequest { username: "alice".to_string() })
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//!
//! println!("{} likes", post.like_count());
//! # Ok(())
//! # }
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;

//! # Service Traits
//!
//! Traits for dependency injection at every seam where the feed client talks to
//! something outside the process: the REST backend, the realtime channel, the
//! clipboard and the browser.

use crate::app::events::EventSink;
use crate::core::error::Result;
use crate::services::realtime::{ChannelGuard, NotificationFlag};
use async_trait::async_trait;
use shared::dto::feed::{CommentRequest, LikeRequest, Post, PostId};
use shared::dto::profile::Profile;

/// Backend REST operations used by the feed.
///
/// Implemented by [`crate::services::api::ApiClient`]; tests use in-memory mocks.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// `GET /api/posts`
    async fn get_posts(&self) -> Result<Vec<Post>>;

    /// `POST /api/posts/{id}/like`, returns the updated post
    async fn like_post(&self, post_id: &PostId, request: &LikeRequest) -> Result<Post>;

    /// `POST /api/posts/{id}/comment`, returns the updated post
    async fn comment_on_post(&self, post_id: &PostId, request: &CommentRequest) -> Result<Post>;

    /// `GET /api/profile/{query}`. Not found is `Ok(None)`.
    async fn get_profile(&self, query: &str) -> Result<Option<Profile>>;
}

/// Opens realtime notification channels.
///
/// `open` must not block: it starts the connection in the background and hands
/// back the guard that owns it. Dropping the guard closes the channel.
pub trait ChannelConnector: Send + Sync {
    fn open(&self, username: &str, flag: NotificationFlag, events: EventSink) -> ChannelGuard;
}

/// Clipboard sink for the share panel.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Opens an external URL (messaging deep link, social app).
pub trait LinkOpener: Send + Sync {
    fn open_url(&self, url: &str) -> Result<()>;
}

//! # Interaction Engine
//!
//! Owns the displayed post collection and keeps it in line with the backend.
//!
//! Mutations never edit a post locally. The backend answers every like or
//! comment with the full post, and that response replaces the entry with the
//! same id. Like and comment counts are always read off the stored post, so
//! nothing is shown that the backend hasn't confirmed. The heart overlay is
//! the one thing shown ahead of the round-trip.
//!
//! Responses are applied in arrival order. Two in-flight mutations on the
//! same post resolve last-arrival-wins; mutations on different posts never
//! touch each other's entries.

use super::events::{EventSink, FeedEvent};
use super::gesture::{GestureDetector, HeartOverlay};
use crate::core::error::{AppError, Result};
use crate::core::service::FeedApi;
use crate::utils::validation::validate_comment;
use parking_lot::{Mutex, RwLock};
use shared::dto::feed::{CommentRequest, LikeRequest, Post, PostId};
use shared::dto::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Post collection plus the like/comment actions on it.
///
/// Clones share state, so a clone can be moved into a spawned task.
#[derive(Clone)]
pub struct FeedEngine {
    api: Arc<dyn FeedApi>,
    session: Option<Arc<Session>>,
    api_base_url: Arc<str>,
    posts: Arc<RwLock<Vec<Post>>>,
    drafts: Arc<RwLock<HashMap<PostId, String>>>,
    gesture: Arc<Mutex<GestureDetector>>,
    heart: HeartOverlay,
    events: EventSink,
}

impl FeedEngine {
    pub fn new(
        api: Arc<dyn FeedApi>,
        session: Option<Session>,
        api_base_url: &str,
        events: EventSink,
    ) -> Self {
        Self {
            api,
            session: session.map(Arc::new),
            api_base_url: Arc::from(api_base_url.trim_end_matches('/')),
            posts: Arc::new(RwLock::new(Vec::new())),
            drafts: Arc::new(RwLock::new(HashMap::new())),
            gesture: Arc::new(Mutex::new(GestureDetector::new())),
            heart: HeartOverlay::new(events.clone()),
            events,
        }
    }

    /// Acting username, if signed in.
    pub fn username(&self) -> Option<&str> {
        self.session.as_deref().map(|s| s.username.as_str())
    }

    fn require_username(&self) -> Result<String> {
        self.username()
            .map(str::to_string)
            .ok_or_else(|| AppError::Session("No signed-in user".to_string()))
    }

    // ========== Reads ==========

    /// Snapshot of the collection in feed order.
    pub fn posts(&self) -> Vec<Post> {
        self.posts.read().clone()
    }

    pub fn post(&self, post_id: &PostId) -> Option<Post> {
        self.posts.read().iter().find(|p| &p.id == post_id).cloned()
    }

    /// Whether the acting user is in the post's likes. Always false when anonymous.
    pub fn is_liked(&self, post_id: &PostId) -> bool {
        let Some(username) = self.username() else {
            return false;
        };
        self.posts
            .read()
            .iter()
            .find(|p| &p.id == post_id)
            .map_or(false, |p| p.is_liked_by(username))
    }

    pub fn like_count(&self, post_id: &PostId) -> Option<usize> {
        self.post(post_id).map(|p| p.like_count())
    }

    pub fn comment_count(&self, post_id: &PostId) -> Option<usize> {
        self.post(post_id).map(|p| p.comment_count())
    }

    /// Absolute URL of a post's media.
    pub fn media_url(&self, post: &Post) -> String {
        shared::utils::join_url(&self.api_base_url, &post.media)
    }

    /// Post currently showing the heart acknowledgment.
    pub fn heart_post(&self) -> Option<PostId> {
        self.heart.current()
    }

    // ========== Drafts ==========

    pub fn draft(&self, post_id: &PostId) -> String {
        self.drafts.read().get(post_id).cloned().unwrap_or_default()
    }

    pub fn set_draft(&self, post_id: &PostId, text: impl Into<String>) {
        self.drafts.write().insert(post_id.clone(), text.into());
    }

    // ========== Mutations ==========

    /// Replace the whole collection with the backend listing.
    ///
    /// On failure the current collection stays as it is.
    pub async fn load_initial(&self) -> Result<usize> {
        match self.api.get_posts().await {
            Ok(posts) => {
                let count = posts.len();
                *self.posts.write() = posts;
                info!(post_count = count, "Feed loaded");
                self.events.emit(FeedEvent::PostsLoaded(count));
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Feed load failed, keeping current posts");
                Err(e)
            }
        }
    }

    /// Send the acting user's like and reconcile with the returned post.
    ///
    /// Whether this adds or removes the like is the backend's call.
    pub async fn toggle_like(&self, post_id: &PostId) -> Result<Post> {
        let username = self.require_username()?;
        let request = LikeRequest { username };

        let updated = self.api.like_post(post_id, &request).await.map_err(|e| {
            warn!(error = %e, post_id = %post_id, "Like failed");
            e
        })?;

        self.replace_post(updated.clone());
        Ok(updated)
    }

    /// Post a comment and reconcile.
    ///
    /// Blank text is a no-op returning `Ok(None)`. On success the draft for
    /// the post is cleared, even if it was edited while the request was out.
    pub async fn add_comment(&self, post_id: &PostId, text: &str) -> Result<Option<Post>> {
        if !validate_comment(text).is_valid {
            debug!(post_id = %post_id, "Ignoring blank comment");
            return Ok(None);
        }
        let username = self.require_username()?;
        let request = CommentRequest {
            username,
            text: text.to_string(),
        };

        let updated = self
            .api
            .comment_on_post(post_id, &request)
            .await
            .map_err(|e| {
                warn!(error = %e, post_id = %post_id, "Comment failed");
                e
            })?;

        self.replace_post(updated.clone());
        self.drafts.write().remove(post_id);
        Ok(Some(updated))
    }

    /// Submit whatever is in the post's draft.
    pub async fn submit_draft(&self, post_id: &PostId) -> Result<Option<Post>> {
        let text = self.draft(post_id);
        self.add_comment(post_id, &text).await
    }

    // ========== Gestures ==========

    /// A single tap on a post's media. Two within the double-tap window like
    /// an unliked post. Returns whether a like was sent.
    pub async fn handle_tap(&self, post_id: &PostId) -> Result<bool> {
        let liked = self.is_liked(post_id);
        let fire = self.gesture.lock().register_tap(Instant::now(), liked);
        if !fire {
            return Ok(false);
        }
        self.like_with_heart(post_id).await
    }

    /// A platform double-click on a post's media.
    pub async fn handle_double_click(&self, post_id: &PostId) -> Result<bool> {
        let liked = self.is_liked(post_id);
        if !GestureDetector::register_double_click(liked) {
            return Ok(false);
        }
        self.like_with_heart(post_id).await
    }

    async fn like_with_heart(&self, post_id: &PostId) -> Result<bool> {
        if self.username().is_none() {
            debug!(post_id = %post_id, "Like gesture ignored, not signed in");
            return Ok(false);
        }
        self.heart.show(post_id);
        self.toggle_like(post_id).await?;
        Ok(true)
    }

    /// Swap in the backend's version of a post. Returns false if the post is
    /// no longer in the collection.
    fn replace_post(&self, updated: Post) -> bool {
        let replaced = {
            let mut posts = self.posts.write();
            match posts.iter_mut().find(|p| p.id == updated.id) {
                Some(slot) => {
                    *slot = updated.clone();
                    true
                }
                None => false,
            }
        };

        if replaced {
            self.events.emit(FeedEvent::PostUpdated(updated));
        } else {
            debug!(post_id = %updated.id, "Dropping update for post not in feed");
        }
        replaced
    }
}

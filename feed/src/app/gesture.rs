//! # Double-Tap Gesture
//!
//! Turns two quick taps on a post's media into one like, and shows a heart
//! over the post for a moment.

use super::events::{EventSink, FeedEvent};
use parking_lot::RwLock;
use shared::dto::feed::PostId;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Maximum gap between two taps that still counts as a double tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);
/// How long the heart stays up.
pub const HEART_DURATION: Duration = Duration::from_millis(700);

/// Remembers the last tap across all posts.
#[derive(Debug, Default)]
pub struct GestureDetector {
    last_tap: Option<Instant>,
}

impl GestureDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tap at `now` and decide whether it completes a like gesture.
    ///
    /// The timestamp is updated whatever the outcome, so a third quick tap
    /// pairs with the second.
    pub fn register_tap(&mut self, now: Instant, already_liked: bool) -> bool {
        let within_window = self
            .last_tap
            .map_or(false, |last| now.saturating_duration_since(last) < DOUBLE_TAP_WINDOW);
        self.last_tap = Some(now);

        within_window && !already_liked
    }

    /// A platform double-click skips the timing check.
    pub fn register_double_click(already_liked: bool) -> bool {
        !already_liked
    }
}

/// Which post currently shows the heart.
///
/// One slot. Every `show` starts its own clear timer that can't be cancelled;
/// whichever timer fires clears whatever is showing at that moment.
#[derive(Debug, Clone, Default)]
pub struct HeartOverlay {
    current: Arc<RwLock<Option<PostId>>>,
    events: EventSink,
}

impl HeartOverlay {
    pub fn new(events: EventSink) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            events,
        }
    }

    pub fn current(&self) -> Option<PostId> {
        self.current.read().clone()
    }

    pub fn is_showing(&self, post_id: &PostId) -> bool {
        self.current.read().as_ref() == Some(post_id)
    }

    /// Show the heart on `post_id` and schedule the clear. Needs a tokio runtime.
    pub fn show(&self, post_id: &PostId) {
        *self.current.write() = Some(post_id.clone());
        self.events.emit(FeedEvent::HeartShown(post_id.clone()));

        let current = Arc::clone(&self.current);
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(HEART_DURATION).await;
            if current.write().take().is_some() {
                events.emit(FeedEvent::HeartCleared);
            }
        });
    }
}

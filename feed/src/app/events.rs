//! # Feed Events
//!
//! Things that change asynchronously, pushed to whatever renders the feed.
//! The rendering layer drains the receiver each frame and repaints.

use async_channel::{Receiver, Sender};
use shared::dto::feed::{Post, PostId};
use shared::dto::profile::Profile;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Initial listing replaced the collection
    PostsLoaded(usize),
    /// One post was reconciled with the backend
    PostUpdated(Post),
    /// Heart acknowledgment shown on a post
    HeartShown(PostId),
    /// Heart acknowledgment cleared
    HeartCleared,
    /// Search results changed
    SearchResults(Vec<Profile>),
    /// Unread flag went from clear to set
    NotificationReceived,
    /// Unread flag cleared by opening the notifications view
    NotificationsCleared,
    /// Realtime channel joined for this username
    ChannelOpened(String),
    /// Realtime channel for this username ended
    ChannelClosed(String),
}

/// Optional sender side of the event channel. A sink with no sender drops everything.
#[derive(Debug, Clone, Default)]
pub struct EventSink(Option<Sender<FeedEvent>>);

impl EventSink {
    pub fn new(sender: Sender<FeedEvent>) -> Self {
        Self(Some(sender))
    }

    /// A sink that discards events.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn emit(&self, event: FeedEvent) {
        if let Some(sender) = &self.0 {
            if let Err(e) = sender.try_send(event) {
                tracing::trace!(error = %e, "Feed event dropped, no receiver");
            }
        }
    }
}

/// Unbounded event channel.
pub fn channel() -> (EventSink, Receiver<FeedEvent>) {
    let (tx, rx) = async_channel::unbounded();
    (EventSink::new(tx), rx)
}

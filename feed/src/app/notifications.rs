//! # Notification Listener
//!
//! Keeps at most one realtime channel open for the page and exposes the
//! unread flag it raises.

use super::events::{EventSink, FeedEvent};
use crate::core::service::ChannelConnector;
use crate::services::realtime::{ChannelGuard, NotificationFlag};
use std::sync::Arc;
use tracing::{debug, info};

pub struct NotificationListener {
    connector: Arc<dyn ChannelConnector>,
    flag: NotificationFlag,
    events: EventSink,
    channel: Option<ChannelGuard>,
}

impl NotificationListener {
    pub fn new(connector: Arc<dyn ChannelConnector>, events: EventSink) -> Self {
        Self {
            connector,
            flag: NotificationFlag::default(),
            events,
            channel: None,
        }
    }

    /// Point the listener at `username`.
    ///
    /// Same username as a live channel: nothing happens. Different, absent,
    /// or the previous channel has ended: the old channel is closed first,
    /// then a new one is opened if there is a non-empty username.
    pub fn set_username(&mut self, username: Option<&str>) {
        let username = username.filter(|u| !u.is_empty());

        if let (Some(wanted), Some(current)) = (username, self.channel.as_ref()) {
            if current.username() == wanted && current.is_live() {
                debug!(username = %wanted, "Notification channel already open");
                return;
            }
            if !current.is_live() {
                debug!(username = %current.username(), "Previous notification channel has ended");
            }
        }

        self.close();

        if let Some(username) = username {
            info!(username = %username, "Opening notification channel");
            self.channel = Some(self.connector.open(username, self.flag.clone(), self.events.clone()));
        }
    }

    /// Close the live channel, if any.
    pub fn close(&mut self) {
        if let Some(guard) = self.channel.take() {
            info!(username = %guard.username(), "Closing notification channel");
            drop(guard);
        }
    }

    /// Username of the open channel.
    pub fn channel_username(&self) -> Option<&str> {
        self.channel.as_ref().map(|c| c.username())
    }

    pub fn has_unread(&self) -> bool {
        self.flag.is_set()
    }

    /// Clear the unread flag (the user opened the notifications view).
    pub fn mark_seen(&self) {
        if self.flag.clear() {
            self.events.emit(FeedEvent::NotificationsCleared);
        }
    }

    /// Shared handle on the unread flag.
    pub fn flag(&self) -> NotificationFlag {
        self.flag.clone()
    }
}

//! # Feed Page
//!
//! [`FeedPage`] wires the feed components together for one page lifetime.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FeedPage                              │
//! │  ┌──────────────┐ ┌───────────────┐ ┌─────────────────────┐  │
//! │  │ FeedEngine   │ │ ProfileLookup │ │ NotificationListener│  │
//! │  │ posts, likes │ │ search box    │ │ realtime channel    │  │
//! │  │ comments,    │ │               │ │ unread flag         │  │
//! │  │ gestures     │ │               │ │                     │  │
//! │  └──────┬───────┘ └──────┬────────┘ └──────────┬──────────┘  │
//! │         │                │                     │             │
//! │  ┌──────▼────────────────▼─────┐   ┌───────────▼──────────┐  │
//! │  │   FeedApi (REST)            │   │ ChannelConnector     │  │
//! │  └─────────────────────────────┘   └──────────────────────┘  │
//! │                                                              │
//! │  ShareComposer ──► Clipboard / LinkOpener                    │
//! │  PageState     ──► search visibility, open thread, view      │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ async_channel (unbounded)
//!                                ▼
//!                        FeedEvent receiver
//! ```
//!
//! ## Key Components
//!
//! - **[`engine`]**: post collection, likes, comments, gestures
//! - **[`events`]**: [`FeedEvent`] pushed to the rendering layer
//! - **[`gesture`]**: double-tap detection and heart overlay
//! - **[`notifications`]**: realtime channel lifecycle
//! - **[`profile`]**: profile search
//! - **[`share`]**: share panel and sinks
//!
//! ## Fire-and-Forget Actions
//!
//! The page's `spawn_*` methods run a mutation on the tokio runtime and log a
//! failure instead of returning it, matching how a click handler would use
//! them. The async methods on [`FeedEngine`] return `Result` for callers that
//! want to wait.

pub mod engine;
pub mod events;
pub mod gesture;
pub mod notifications;
pub mod profile;
pub mod share;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::FeedEngine;
pub use events::{EventSink, FeedEvent};
pub use notifications::NotificationListener;
pub use profile::ProfileLookup;
pub use share::{ShareComposer, ShareOutcome};

use crate::config::FeedConfig;
use crate::core::error::Result;
use crate::core::service::{ChannelConnector, Clipboard, FeedApi, LinkOpener};
use crate::services::api::ApiClient;
use crate::services::realtime::SocketIoConnector;
use crate::services::share::{SystemBrowser, SystemClipboard};
use async_channel::Receiver;
use shared::dto::feed::PostId;
use shared::dto::session::Session;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// External services the page talks to.
#[derive(Clone)]
pub struct FeedServices {
    pub api: Arc<dyn FeedApi>,
    pub connector: Arc<dyn ChannelConnector>,
    pub clipboard: Arc<dyn Clipboard>,
    pub opener: Arc<dyn LinkOpener>,
}

impl FeedServices {
    /// Real backend, Socket.IO channel, OS clipboard, system browser.
    pub fn production(config: &FeedConfig) -> Self {
        Self {
            api: Arc::new(ApiClient::new(config.api_base_url.as_str())),
            connector: Arc::new(SocketIoConnector::new(config.socket_url.as_str())),
            clipboard: Arc::new(SystemClipboard::new()),
            opener: Arc::new(SystemBrowser),
        }
    }
}

/// Top-level view the page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Notifications,
}

/// Purely presentational page state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub show_search: bool,
    /// Post whose comment thread is expanded
    pub open_comments: Option<PostId>,
    pub view: View,
}

pub struct FeedPage {
    session: Option<Session>,
    engine: FeedEngine,
    search: ProfileLookup,
    notifications: NotificationListener,
    share: ShareComposer,
    state: PageState,
}

impl FeedPage {
    /// Build the page and the receiver its events are delivered on.
    pub fn new(
        config: &FeedConfig,
        session: Option<Session>,
        services: FeedServices,
    ) -> (Self, Receiver<FeedEvent>) {
        let (events, receiver) = events::channel();

        let engine = FeedEngine::new(
            services.api.clone(),
            session.clone(),
            &config.api_base_url,
            events.clone(),
        );
        let search = ProfileLookup::new(services.api, events.clone());
        let notifications = NotificationListener::new(services.connector, events);
        let share = ShareComposer::new(&config.page_origin, services.clipboard, services.opener);

        let page = Self {
            session,
            engine,
            search,
            notifications,
            share,
            state: PageState::default(),
        };
        (page, receiver)
    }

    // ========== Lifecycle ==========

    /// Page became visible: open the notification channel and load posts.
    ///
    /// The channel is opened even if the listing fails.
    pub async fn activate(&mut self) -> Result<usize> {
        let username = self.session.as_ref().map(|s| s.username.clone());
        info!(username = ?username, "Activating feed page");

        self.notifications.set_username(username.as_deref());
        self.engine.load_initial().await
    }

    /// Page went away: close the notification channel.
    pub fn deactivate(&mut self) {
        info!("Deactivating feed page");
        self.notifications.close();
    }

    // ========== Accessors ==========

    pub fn engine(&self) -> &FeedEngine {
        &self.engine
    }

    pub fn search(&self) -> &ProfileLookup {
        &self.search
    }

    pub fn notifications(&self) -> &NotificationListener {
        &self.notifications
    }

    pub fn share(&mut self) -> &mut ShareComposer {
        &mut self.share
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Usernames the signed-in user follows. Empty when anonymous.
    pub fn following(&self) -> &[String] {
        self.session
            .as_ref()
            .map(|s| s.following_list.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_unread(&self) -> bool {
        self.notifications.has_unread()
    }

    // ========== Page State ==========

    pub fn toggle_search(&mut self) -> bool {
        self.state.show_search = !self.state.show_search;
        debug!(show_search = self.state.show_search, "Search toggled");
        self.state.show_search
    }

    /// Update the search query and run the lookup.
    pub async fn set_search(&self, query: &str) -> Result<()> {
        self.search.search(query).await
    }

    /// Expand `post_id`'s comment thread, or collapse it if it is the open one.
    pub fn toggle_comments(&mut self, post_id: &PostId) -> Option<&PostId> {
        if self.state.open_comments.as_ref() == Some(post_id) {
            self.state.open_comments = None;
        } else {
            self.state.open_comments = Some(post_id.clone());
        }
        self.state.open_comments.as_ref()
    }

    /// Navigate to the notifications view, clearing the unread flag.
    pub fn open_notifications(&mut self) {
        self.notifications.mark_seen();
        self.state.view = View::Notifications;
        info!("Opened notifications");
    }

    pub fn go_home(&mut self) {
        self.state.view = View::Home;
    }

    // ========== Fire-and-Forget ==========

    pub fn spawn_toggle_like(&self, post_id: PostId) -> JoinHandle<()> {
        let engine = self.engine.clone();
        tokio::spawn(async move {
            if let Err(e) = engine.toggle_like(&post_id).await {
                warn!(error = %e, post_id = %post_id, "Background like failed");
            }
        })
    }

    pub fn spawn_submit_comment(&self, post_id: PostId) -> JoinHandle<()> {
        let engine = self.engine.clone();
        tokio::spawn(async move {
            if let Err(e) = engine.submit_draft(&post_id).await {
                warn!(error = %e, post_id = %post_id, "Background comment failed");
            }
        })
    }

    /// Register a tap now; the like, if the tap completes a double-tap, runs
    /// in the background.
    pub fn spawn_tap(&self, post_id: PostId) -> JoinHandle<()> {
        let engine = self.engine.clone();
        tokio::spawn(async move {
            if let Err(e) = engine.handle_tap(&post_id).await {
                warn!(error = %e, post_id = %post_id, "Double-tap like failed");
            }
        })
    }

    pub fn spawn_search(&self, query: String) -> JoinHandle<()> {
        let search = self.search.clone();
        tokio::spawn(async move {
            if let Err(e) = search.search(&query).await {
                warn!(error = %e, query = %query, "Background search failed");
            }
        })
    }
}

impl Drop for FeedPage {
    fn drop(&mut self) {
        self.notifications.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{
        post, profile, session, MemoryClipboard, MockConnector, MockFeedApi, RecordingOpener,
    };
    use std::time::Duration;

    struct Harness {
        page: FeedPage,
        events: Receiver<FeedEvent>,
        api: Arc<MockFeedApi>,
        connector: Arc<MockConnector>,
        clipboard: Arc<MemoryClipboard>,
        opener: Arc<RecordingOpener>,
    }

    fn harness(session: Option<Session>) -> Harness {
        let api = Arc::new(MockFeedApi::with_posts(vec![post("1", &[]), post("2", &["bob"])]));
        api.add_profile(profile("carol"));
        let connector = Arc::new(MockConnector::default());
        let clipboard = Arc::new(MemoryClipboard::new());
        let opener = Arc::new(RecordingOpener::default());

        let config = FeedConfig {
            page_origin: "https://example.com".to_string(),
            ..FeedConfig::default()
        };
        let services = FeedServices {
            api: api.clone(),
            connector: connector.clone(),
            clipboard: clipboard.clone(),
            opener: opener.clone(),
        };
        let (page, events) = FeedPage::new(&config, session, services);

        Harness {
            page,
            events,
            api,
            connector,
            clipboard,
            opener,
        }
    }

    fn drain(events: &Receiver<FeedEvent>) -> Vec<FeedEvent> {
        std::iter::from_fn(|| events.try_recv().ok()).collect()
    }

    #[tokio::test]
    async fn test_activate_opens_channel_and_loads() {
        let mut h = harness(Some(session("alice")));

        assert_eq!(h.page.activate().await.unwrap(), 2);
        assert_eq!(h.connector.opened(), vec!["alice"]);
        assert_eq!(h.page.engine().posts().len(), 2);
        assert!(drain(&h.events).contains(&FeedEvent::PostsLoaded(2)));
    }

    #[tokio::test]
    async fn test_anonymous_activate_loads_without_channel() {
        let mut h = harness(None);

        h.page.activate().await.unwrap();
        assert!(h.connector.opened().is_empty());
        assert_eq!(h.page.engine().posts().len(), 2);
        assert!(h.page.following().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_still_opens_channel() {
        let mut h = harness(Some(session("alice")));
        h.api.fail_next_call();

        assert!(h.page.activate().await.is_err());
        assert_eq!(h.connector.live_count(), 1);
        assert!(h.page.engine().posts().is_empty());
    }

    #[tokio::test]
    async fn test_deactivate_and_drop_close_channel() {
        let mut h = harness(Some(session("alice")));
        h.page.activate().await.unwrap();

        h.page.deactivate();
        assert_eq!(h.connector.live_count(), 0);

        h.page.activate().await.unwrap();
        assert_eq!(h.connector.live_count(), 1);
        drop(h.page);
        assert_eq!(h.connector.live_count(), 0);
    }

    #[tokio::test]
    async fn test_reactivate_reconnects_ended_channel() {
        let mut h = harness(Some(session("alice")));
        h.page.activate().await.unwrap();
        h.page.activate().await.unwrap();
        assert_eq!(h.connector.opened(), vec!["alice"]);

        h.connector.end_channel("alice");
        h.page.activate().await.unwrap();

        assert_eq!(h.connector.opened(), vec!["alice", "alice"]);
        assert_eq!(h.connector.live_count(), 1);
    }

    #[tokio::test]
    async fn test_notifications_flag_and_view() {
        let mut h = harness(Some(session("alice")));
        h.page.activate().await.unwrap();

        let flag = h.page.notifications().flag();
        flag.raise();
        flag.raise();
        assert!(h.page.has_unread());

        h.page.open_notifications();
        assert!(!h.page.has_unread());
        assert_eq!(h.page.state().view, View::Notifications);
        assert!(drain(&h.events).contains(&FeedEvent::NotificationsCleared));

        h.page.go_home();
        assert_eq!(h.page.state().view, View::Home);
    }

    #[test]
    fn test_toggle_search_and_comments() {
        let mut h = harness(None);
        let first = PostId::from("1");
        let second = PostId::from("2");

        assert!(h.page.toggle_search());
        assert!(!h.page.toggle_search());

        assert_eq!(h.page.toggle_comments(&first), Some(&first));
        assert_eq!(h.page.toggle_comments(&second), Some(&second));
        assert_eq!(h.page.toggle_comments(&second), None);
    }

    #[tokio::test]
    async fn test_set_search() {
        let h = harness(None);

        h.page.set_search("carol").await.unwrap();
        assert_eq!(h.page.search().results(), vec![profile("carol")]);

        h.page.set_search("").await.unwrap();
        assert!(h.page.search().results().is_empty());
        assert_eq!(h.api.profile_calls(), vec!["carol"]);
    }

    #[test]
    fn test_following_from_session() {
        let h = harness(Some(session("alice")));
        assert_eq!(h.page.following(), ["bob".to_string()]);
    }

    #[tokio::test]
    async fn test_spawned_like_and_comment() {
        let mut h = harness(Some(session("alice")));
        h.page.activate().await.unwrap();
        let id = PostId::from("1");

        h.page.spawn_toggle_like(id.clone()).await.unwrap();
        assert!(h.page.engine().is_liked(&id));

        h.page.engine().set_draft(&id, "nice");
        h.page.spawn_submit_comment(id.clone()).await.unwrap();
        assert_eq!(h.page.engine().comment_count(&id), Some(1));
        assert_eq!(h.page.engine().draft(&id), "");
    }

    #[tokio::test]
    async fn test_spawned_like_failure_is_swallowed() {
        let h = harness(None);
        h.page.spawn_toggle_like(PostId::from("1")).await.unwrap();
        assert!(h.api.like_calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_double_tap() {
        let mut h = harness(Some(session("alice")));
        h.page.activate().await.unwrap();
        let id = PostId::from("1");

        h.page.spawn_tap(id.clone()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        h.page.spawn_tap(id.clone()).await.unwrap();

        assert_eq!(h.api.like_calls().len(), 1);
        assert!(h.page.engine().is_liked(&id));
    }

    #[tokio::test]
    async fn test_share_through_page() {
        let mut h = harness(None);
        let id = PostId::from("42");

        h.page.share().open(&id);
        let outcome = h.page.share().copy_link(&id).unwrap();

        assert_eq!(outcome.link, "https://example.com/post/42");
        assert_eq!(h.clipboard.contents().as_deref(), Some("https://example.com/post/42"));
        assert!(h.page.share().target().is_none());

        h.page.share().share_whatsapp(&id).unwrap();
        assert_eq!(h.opener.opened().len(), 1);
    }

    #[tokio::test]
    async fn test_spawned_search() {
        let h = harness(None);
        h.page.spawn_search("carol".to_string()).await.unwrap();
        assert_eq!(h.page.search().results(), vec![profile("carol")]);
    }
}

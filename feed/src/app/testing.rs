//! In-memory service doubles for unit tests.

use crate::app::events::EventSink;
use crate::core::error::{AppError, Result};
use crate::core::service::{ChannelConnector, Clipboard, FeedApi, LinkOpener};
use crate::services::realtime::{ChannelGuard, NotificationFlag};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared::dto::feed::{Comment, CommentId, CommentRequest, LikeRequest, Post, PostId};
use shared::dto::profile::Profile;
use shared::dto::session::Session;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::oneshot;

pub fn post(id: &str, likes: &[&str]) -> Post {
    Post {
        id: PostId::from(id),
        username: "bob".to_string(),
        media: format!("/uploads/{}.jpg", id),
        caption: None,
        likes: likes.iter().map(|u| u.to_string()).collect(),
        comments: Vec::new(),
    }
}

pub fn session(username: &str) -> Session {
    Session {
        username: username.to_string(),
        following_list: vec!["bob".to_string()],
    }
}

pub fn profile(username: &str) -> Profile {
    Profile {
        username: username.to_string(),
        extra: serde_json::Map::new(),
    }
}

#[derive(Default)]
struct MockState {
    posts: Vec<Post>,
    profiles: HashMap<String, Profile>,
    profile_delays: HashMap<String, Duration>,
    like_script: VecDeque<(Post, Duration)>,
    fail_next: bool,
    next_comment_id: u64,
    get_posts_calls: usize,
    like_calls: Vec<(PostId, String)>,
    comment_calls: Vec<(PostId, String, String)>,
    profile_calls: Vec<String>,
}

/// Backend double that behaves like the real one: likes toggle, comments append.
#[derive(Default)]
pub struct MockFeedApi {
    state: Mutex<MockState>,
}

impl MockFeedApi {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let api = Self::default();
        api.state.lock().posts = posts;
        api
    }

    pub fn add_profile(&self, profile: Profile) {
        self.state.lock().profiles.insert(profile.username.clone(), profile);
    }

    pub fn delay_profile(&self, query: &str, delay: Duration) {
        self.state.lock().profile_delays.insert(query.to_string(), delay);
    }

    /// Answer the next unscripted like with `post` after `delay`.
    pub fn script_like(&self, post: Post, delay: Duration) {
        self.state.lock().like_script.push_back((post, delay));
    }

    pub fn fail_next_call(&self) {
        self.state.lock().fail_next = true;
    }

    pub fn get_posts_calls(&self) -> usize {
        self.state.lock().get_posts_calls
    }

    pub fn like_calls(&self) -> Vec<(PostId, String)> {
        self.state.lock().like_calls.clone()
    }

    pub fn comment_calls(&self) -> Vec<(PostId, String, String)> {
        self.state.lock().comment_calls.clone()
    }

    pub fn profile_calls(&self) -> Vec<String> {
        self.state.lock().profile_calls.clone()
    }
}

fn take_failure(state: &mut MockState) -> Result<()> {
    if std::mem::take(&mut state.fail_next) {
        return Err(AppError::Api("Network error: connection refused".to_string()));
    }
    Ok(())
}

fn not_found(post_id: &PostId) -> AppError {
    AppError::Api(format!("404 Not Found: no post {}", post_id))
}

#[async_trait]
impl FeedApi for MockFeedApi {
    async fn get_posts(&self) -> Result<Vec<Post>> {
        let mut state = self.state.lock();
        state.get_posts_calls += 1;
        take_failure(&mut state)?;
        Ok(state.posts.clone())
    }

    async fn like_post(&self, post_id: &PostId, request: &LikeRequest) -> Result<Post> {
        let (result, delay) = {
            let mut state = self.state.lock();
            state.like_calls.push((post_id.clone(), request.username.clone()));
            match take_failure(&mut state) {
                Err(e) => (Err(e), Duration::ZERO),
                Ok(()) => match state.like_script.pop_front() {
                    Some((post, delay)) => (Ok(post), delay),
                    None => {
                        let found = state.posts.iter_mut().find(|p| &p.id == post_id);
                        let result = match found {
                            Some(post) => {
                                if !post.likes.remove(&request.username) {
                                    post.likes.insert(request.username.clone());
                                }
                                Ok(post.clone())
                            }
                            None => Err(not_found(post_id)),
                        };
                        (result, Duration::ZERO)
                    }
                },
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn comment_on_post(&self, post_id: &PostId, request: &CommentRequest) -> Result<Post> {
        let mut state = self.state.lock();
        state
            .comment_calls
            .push((post_id.clone(), request.username.clone(), request.text.clone()));
        take_failure(&mut state)?;

        state.next_comment_id += 1;
        let comment = Comment {
            id: CommentId(state.next_comment_id.to_string()),
            username: request.username.clone(),
            text: request.text.clone(),
        };
        let post = state
            .posts
            .iter_mut()
            .find(|p| &p.id == post_id)
            .ok_or_else(|| not_found(post_id))?;
        post.comments.push(comment);
        Ok(post.clone())
    }

    async fn get_profile(&self, query: &str) -> Result<Option<Profile>> {
        let (result, delay) = {
            let mut state = self.state.lock();
            state.profile_calls.push(query.to_string());
            take_failure(&mut state)?;
            (
                state.profiles.get(query).cloned(),
                state.profile_delays.get(query).copied().unwrap_or_default(),
            )
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(result)
    }
}

/// Connector that opens nothing but tracks guard lifetimes.
#[derive(Default)]
pub struct MockConnector {
    opened: Mutex<Vec<(String, Option<oneshot::Receiver<()>>)>>,
    overlap_seen: Mutex<bool>,
}

fn is_closed(rx: &mut oneshot::Receiver<()>) -> bool {
    !matches!(rx.try_recv(), Err(oneshot::error::TryRecvError::Empty))
}

impl MockConnector {
    /// Usernames passed to `open`, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().iter().map(|(u, _)| u.clone()).collect()
    }

    /// How many opened channels are neither closed by their guard nor ended.
    pub fn live_count(&self) -> usize {
        self.opened
            .lock()
            .iter_mut()
            .filter_map(|(_, rx)| rx.as_mut())
            .map(is_closed)
            .filter(|closed| !closed)
            .count()
    }

    /// Whether `open` was ever called while another channel was still live.
    pub fn overlap_seen(&self) -> bool {
        *self.overlap_seen.lock()
    }

    /// End the most recent channel for `username` from the server side.
    pub fn end_channel(&self, username: &str) {
        let mut opened = self.opened.lock();
        if let Some((_, rx)) = opened.iter_mut().rev().find(|(u, _)| u == username) {
            rx.take();
        }
    }
}

impl ChannelConnector for MockConnector {
    fn open(&self, username: &str, _flag: NotificationFlag, _events: EventSink) -> ChannelGuard {
        if self.live_count() > 0 {
            *self.overlap_seen.lock() = true;
        }
        let (tx, rx) = oneshot::channel();
        self.opened.lock().push((username.to_string(), Some(rx)));
        ChannelGuard::new(username, tx, None)
    }
}

/// Link opener that records URLs.
#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    fail: Mutex<bool>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    pub fn fail_always(&self) {
        *self.fail.lock() = true;
    }
}

impl LinkOpener for RecordingOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        if *self.fail.lock() {
            return Err(AppError::Share("no browser".to_string()));
        }
        self.opened.lock().push(url.to_string());
        Ok(())
    }
}

/// Clipboard that keeps the last copied text.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: RwLock<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.read().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        *self.contents.write() = Some(text.to_string());
        Ok(())
    }
}

//! # API Client
//!
//! Main HTTP client for backend API communication.

use crate::core::error::{AppError, Result};
use crate::core::service::FeedApi;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::dto::feed::{CommentRequest, LikeRequest, Post, PostId};
use shared::dto::profile::Profile;
use std::time::Duration;

/// Request timeout so a dead backend can't leave a mutation pending forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for communicating with the feed backend.
///
/// Cheap to share behind an `Arc`; `reqwest::Client` pools connections internally.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:4000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        shared::utils::join_url(&self.base_url, path)
    }
}

/// Decode a successful JSON body, or turn the status and body text into an error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(AppError::from);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(AppError::Api(format!("{}: {}", status, error_text)))
}

#[async_trait::async_trait]
impl FeedApi for ApiClient {
    async fn get_posts(&self) -> Result<Vec<Post>> {
        crate::services::api::posts::get_posts(self).await
    }

    async fn like_post(&self, post_id: &PostId, request: &LikeRequest) -> Result<Post> {
        crate::services::api::posts::like_post(self, post_id, request).await
    }

    async fn comment_on_post(&self, post_id: &PostId, request: &CommentRequest) -> Result<Post> {
        crate::services::api::posts::comment_on_post(self, post_id, request).await
    }

    async fn get_profile(&self, query: &str) -> Result<Option<Profile>> {
        crate::services::api::profile::get_profile(self, query).await
    }
}

//! # Post Endpoints
//!
//! Feed listing and the two mutations (like, comment). Both mutations return
//! the backend's full updated post, which the engine swaps into its collection.

use super::client::{read_json, ApiClient};
use crate::core::error::Result;
use shared::dto::feed::{CommentRequest, LikeRequest, Post, PostId};

fn post_action_path(post_id: &PostId, action: &str) -> String {
    format!("/api/posts/{}/{}", urlencoding::encode(post_id.as_str()), action)
}

/// Fetch the whole feed.
#[tracing::instrument(skip(client))]
pub async fn get_posts(client: &ApiClient) -> Result<Vec<Post>> {
    let start = std::time::Instant::now();

    let response = client
        .client
        .get(client.url("/api/posts"))
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Feed fetch network error");
            e
        })?;

    let posts: Vec<Post> = read_json(response).await?;
    tracing::debug!(
        duration_ms = start.elapsed().as_millis(),
        post_count = posts.len(),
        "Feed fetched"
    );
    Ok(posts)
}

/// Send a like for `request.username`. The backend decides the resulting likes set.
#[tracing::instrument(skip(client, post_id, request), fields(post_id = %post_id, username = %request.username))]
pub async fn like_post(client: &ApiClient, post_id: &PostId, request: &LikeRequest) -> Result<Post> {
    let start = std::time::Instant::now();

    let response = client
        .client
        .post(client.url(&post_action_path(post_id, "like")))
        .json(request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Like network error");
            e
        })?;

    let post: Post = read_json(response).await?;
    tracing::debug!(
        duration_ms = start.elapsed().as_millis(),
        like_count = post.like_count(),
        "Like acknowledged"
    );
    Ok(post)
}

/// Post a comment. The text is sent exactly as typed.
#[tracing::instrument(skip(client, post_id, request), fields(post_id = %post_id, username = %request.username))]
pub async fn comment_on_post(
    client: &ApiClient,
    post_id: &PostId,
    request: &CommentRequest,
) -> Result<Post> {
    let start = std::time::Instant::now();

    let response = client
        .client
        .post(client.url(&post_action_path(post_id, "comment")))
        .json(request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Comment network error");
            e
        })?;

    let post: Post = read_json(response).await?;
    tracing::debug!(
        duration_ms = start.elapsed().as_millis(),
        comment_count = post.comment_count(),
        "Comment acknowledged"
    );
    Ok(post)
}

//! # Feed Data Transfer Objects
//!
//! Posts, comments and the request bodies for the like/comment endpoints.
//!
//! The backend is loose about a few things, so deserialization is lenient:
//! - ids may arrive as JSON strings or numbers and are kept as strings
//! - `likes` / `comments` may be missing or `null` and become empty

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PostId(pub String);

/// Opaque comment identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Uint(n) => n.to_string(),
            RawId::Float(n) => n.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| PostId(raw.into()))
    }
}

impl<'de> Deserialize<'de> for CommentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| CommentId(raw.into()))
    }
}

impl PostId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        PostId(id.to_string())
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        PostId(id)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A comment on a post. Never created locally, only received from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub username: String,
    pub text: String,
}

/// A post as served by `/api/posts` and returned by the mutation endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub username: String,
    /// Path of the media file, relative to the backend base URL.
    #[serde(alias = "mediaPath", default)]
    pub media: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Whether `username` is in this post's likes.
    pub fn is_liked_by(&self, username: &str) -> bool {
        self.likes.contains(username)
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// Body of `POST /api/posts/{id}/like`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRequest {
    pub username: String,
}

/// Body of `POST /api/posts/{id}/comment`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRequest {
    pub username: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_accepts_numeric_ids() {
        let post: Post = serde_json::from_value(json!({
            "id": 7,
            "username": "bob",
            "media": "/uploads/7.jpg",
            "likes": ["alice"],
            "comments": [{ "id": 1, "username": "alice", "text": "nice" }]
        }))
        .unwrap();

        assert_eq!(post.id, PostId::from("7"));
        assert_eq!(post.comments[0].id, CommentId("1".to_string()));
        assert!(post.is_liked_by("alice"));
        assert!(!post.is_liked_by("bob"));
    }

    #[test]
    fn test_post_missing_or_null_collections() {
        let post: Post = serde_json::from_value(json!({
            "id": "abc",
            "username": "bob",
            "media": "/m.png",
            "likes": null
        }))
        .unwrap();

        assert_eq!(post.like_count(), 0);
        assert_eq!(post.comment_count(), 0);
        assert_eq!(post.caption, None);
    }

    #[test]
    fn test_media_path_alias() {
        let post: Post = serde_json::from_value(json!({
            "id": "1",
            "username": "bob",
            "mediaPath": "/uploads/1.jpg"
        }))
        .unwrap();

        assert_eq!(post.media, "/uploads/1.jpg");
    }

    #[test]
    fn test_duplicate_likes_collapse() {
        let post: Post = serde_json::from_value(json!({
            "id": "1",
            "username": "bob",
            "media": "",
            "likes": ["alice", "alice", "carol"]
        }))
        .unwrap();

        assert_eq!(post.like_count(), 2);
    }

    #[test]
    fn test_comment_request_wire_format() {
        let body = serde_json::to_value(CommentRequest {
            username: "alice".to_string(),
            text: "hi".to_string(),
        })
        .unwrap();

        assert_eq!(body, json!({ "username": "alice", "text": "hi" }));
    }
}

//! # Shared Utility Functions
//!
//! URL helpers used when turning posts into something a user can open.
//!
//! ```rust
//! use shared::utils::{join_url, post_link};
//!
//! assert_eq!(join_url("http://localhost:4000/", "/uploads/a.jpg"), "http://localhost:4000/uploads/a.jpg");
//! assert_eq!(post_link("https://example.com", "42"), "https://example.com/post/42");
//! ```

/// Join `base` and `path` with exactly one `/` between them.
///
/// An empty `path` returns `base` without a trailing slash.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        return base.to_string();
    }

    format!("{}/{}", base, path)
}

/// Canonical shareable link for a post: `{origin}/post/{id}`.
pub fn post_link(origin: &str, post_id: &str) -> String {
    format!("{}/post/{}", origin.trim_end_matches('/'), post_id)
}

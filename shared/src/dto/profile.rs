//! # Profile Data Transfer Objects
//!
//! Response of `GET /api/profile/{query}`.

use serde::{Deserialize, Serialize};

/// Profile record returned by an exact-match lookup.
///
/// Only `username` is interpreted; any other fields the backend sends are kept
/// as-is in `extra` so a renderer can show them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

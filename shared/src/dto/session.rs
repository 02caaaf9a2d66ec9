//! # Session Data Transfer Objects
//!
//! The identity record the web client persists under the `user` storage key.

use serde::{Deserialize, Serialize};

/// Storage key the session record lives under.
pub const SESSION_STORAGE_KEY: &str = "user";

/// Signed-in user as persisted by the login flow.
///
/// The login flow stores more fields than this (token, email, ...); they are
/// ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    #[serde(default)]
    pub following_list: Vec<String>,
}

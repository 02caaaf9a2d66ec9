//! # Session Store
//!
//! Reads the signed-in user that the login flow persisted.
//!
//! The store is a JSON object of key → value, the same shape as the web
//! client's local storage. The session lives under [`SESSION_STORAGE_KEY`];
//! its value may be the record itself or a JSON string holding it (what
//! local storage actually keeps).
//!
//! ```text
//! { "user": "{\"username\":\"alice\",\"followingList\":[\"bob\"]}" }
//! { "user": { "username": "alice", "followingList": ["bob"] } }
//! ```
//!
//! A missing file, missing key, `null`, or anything unparseable means nobody
//! is signed in. None of those are errors to the page.

use crate::utils::validation::validate_username;
use serde_json::Value;
use shared::dto::session::{Session, SESSION_STORAGE_KEY};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the session once. `None` means anonymous browsing.
    pub fn load(&self) -> Option<Session> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session store, browsing anonymously");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Session store unreadable");
                return None;
            }
        };

        let session = parse_store(&raw)?;
        info!(username = %session.username, following = session.following_list.len(), "Session loaded");
        Some(session)
    }
}

/// Pull the session out of a serialized store.
pub fn parse_store(raw: &str) -> Option<Session> {
    let store: Value = match serde_json::from_str(raw) {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "Session store is not valid JSON");
            return None;
        }
    };

    let entry = store.get(SESSION_STORAGE_KEY)?;
    let record = match entry {
        Value::Null => return None,
        Value::String(inner) => match serde_json::from_str::<Value>(inner) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Session entry is not valid JSON");
                return None;
            }
        },
        other => other.clone(),
    };

    if record.is_null() {
        return None;
    }

    let session: Session = match serde_json::from_value(record) {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "Session entry has an unexpected shape");
            return None;
        }
    };

    if let Some(error) = validate_username(&session.username).error {
        warn!(error = %error, "Ignoring session with invalid username");
        return None;
    }

    Some(session)
}

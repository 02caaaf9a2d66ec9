//! Feed client configuration from environment variables

use crate::core::error::Result;
use crate::utils::validation::validate_base_url;
use std::path::PathBuf;

/// Backend the web build talked to in development.
const DEFAULT_API_URL: &str = "http://localhost:4000";
const DEFAULT_PAGE_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_SESSION_FILE: &str = "session.json";

/// Where the feed client connects and what it considers its own origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// REST base URL, also the prefix for post media
    pub api_base_url: String,
    /// Socket.IO server base URL
    pub socket_url: String,
    /// Origin used to build shareable post links
    pub page_origin: String,
    /// Persisted client state holding the session record
    pub session_file: PathBuf,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            socket_url: DEFAULT_API_URL.to_string(),
            page_origin: DEFAULT_PAGE_ORIGIN.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl FeedConfig {
    /// Load configuration from environment variables.
    ///
    /// `FEED_SOCKET_URL` falls back to `FEED_API_URL`, since both are served
    /// by the same backend unless told otherwise.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = lookup("FEED_API_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            socket_url: lookup("FEED_SOCKET_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| api_base_url.clone()),
            page_origin: lookup("FEED_PAGE_ORIGIN")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_PAGE_ORIGIN.to_string()),
            session_file: lookup("FEED_SESSION_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE)),
            api_base_url,
        }
    }

    /// Reject endpoints that aren't absolute http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        validate_base_url("FEED_API_URL", &self.api_base_url).into_result()?;
        validate_base_url("FEED_SOCKET_URL", &self.socket_url).into_result()?;
        validate_base_url("FEED_PAGE_ORIGIN", &self.page_origin).into_result()
    }
}

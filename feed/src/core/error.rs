//! # Common Error Types
//!
//! Consolidated error handling for the feed client.
//!
//! ## Error Categories
//! Errors are categorized by their source:
//!
//! - **Api**: Backend REST communication errors (network, HTTP status, JSON parsing)
//! - **Channel**: Realtime notification channel errors (connect, protocol)
//! - **Session**: No signed-in user, or the session store could not be read
//! - **Validation**: Input rejected before any network call
//! - **Share**: Clipboard or link-opening sink failures
//!
//! None of these are fatal to the page. Callers log them and leave the
//! displayed state as it was.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use feed::core::error::AppError;
//!
//! fn require_scheme(url: &str) -> Result<&str, AppError> {
//!     if !url.starts_with("http") {
//!         return Err(AppError::Validation(format!("Not an http(s) URL: {}", url)));
//!     }
//!     Ok(url)
//! }
//! ```

use thiserror::Error;

/// Application-wide error type for the feed client.
///
/// ```rust
/// use feed::core::error::AppError;
///
/// let api_err = AppError::Api("Network error: connection refused".to_string());
/// let session_err = AppError::Session("No signed-in user".to_string());
///
/// assert_eq!(api_err.to_string(), "API error: Network error: connection refused");
/// assert_eq!(session_err.to_string(), "Session error: No signed-in user");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend REST call failed.
    ///
    /// - Network failures (connection refused, timeout, DNS errors)
    /// - Non-success HTTP status
    /// - Malformed JSON in the response
    #[error("API error: {0}")]
    Api(String),

    /// Realtime channel failed to connect or spoke an unexpected protocol.
    #[error("Channel error: {0}")]
    Channel(String),

    /// Operation needs a signed-in user and there is none, or the store is unreadable.
    #[error("Session error: {0}")]
    Session(String),

    /// Input rejected locally (e.g. a configured URL without an http(s) scheme).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Clipboard write or external link open failed.
    #[error("Share error: {0}")]
    Share(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Api(format!("Failed to parse response: {}", err))
        } else {
            AppError::Api(format!("Network error: {}", err))
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for AppError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        AppError::Channel(err.to_string())
    }
}

//! # Profile Endpoint
//!
//! Exact-match profile lookup.

use super::client::ApiClient;
use crate::core::error::{AppError, Result};
use shared::dto::profile::Profile;

/// Look up a profile by exact username.
///
/// Any non-success status (404 in practice) is "no match", not an error.
#[tracing::instrument(skip(client))]
pub async fn get_profile(client: &ApiClient, query: &str) -> Result<Option<Profile>> {
    let url = client.url(&format!("/api/profile/{}", urlencoding::encode(query)));

    let response = client.client.get(&url).send().await.map_err(|e| {
        tracing::error!(error = %e, "Profile lookup network error");
        AppError::from(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), "Profile not found");
        return Ok(None);
    }

    let profile = response.json::<Profile>().await.map_err(AppError::from)?;
    Ok(Some(profile))
}

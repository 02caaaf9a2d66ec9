//! # Share Composer
//!
//! The share panel: which post it is open for, the canonical link, and the
//! three ways out (copy, WhatsApp, Instagram). Every action closes the panel,
//! whether or not its sink succeeded.

use crate::core::error::Result;
use crate::core::service::{Clipboard, LinkOpener};
use shared::dto::feed::PostId;
use std::sync::Arc;
use tracing::{info, warn};

pub const COPY_NOTICE: &str = "Link copied!";
pub const INSTAGRAM_NOTICE: &str = "Link copied! Paste in Instagram DM or Story";
/// Text placed before the link in the WhatsApp composer.
pub const WHATSAPP_CAPTION: &str = "Check this post 👇";
const WHATSAPP_URL: &str = "https://wa.me/";
/// Instagram has no composer deep link, so the user pastes manually.
const INSTAGRAM_URL: &str = "https://www.instagram.com/";

/// Result of a share action, for the renderer to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    pub link: String,
    /// Confirmation to show the user, if the action has one.
    pub notice: Option<&'static str>,
    /// External URL that was opened, if any.
    pub opened_url: Option<String>,
}

pub struct ShareComposer {
    origin: String,
    target: Option<PostId>,
    clipboard: Arc<dyn Clipboard>,
    opener: Arc<dyn LinkOpener>,
}

impl ShareComposer {
    pub fn new(origin: &str, clipboard: Arc<dyn Clipboard>, opener: Arc<dyn LinkOpener>) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            target: None,
            clipboard,
            opener,
        }
    }

    /// Post the panel is open for.
    pub fn target(&self) -> Option<&PostId> {
        self.target.as_ref()
    }

    pub fn open(&mut self, post_id: &PostId) {
        self.target = Some(post_id.clone());
    }

    /// Click outside the panel.
    pub fn dismiss(&mut self) {
        self.target = None;
    }

    pub fn link(&self, post_id: &PostId) -> String {
        shared::utils::post_link(&self.origin, post_id.as_str())
    }

    pub fn whatsapp_url(&self, post_id: &PostId) -> String {
        let text = format!("{}\n{}", WHATSAPP_CAPTION, self.link(post_id));
        format!("{}?text={}", WHATSAPP_URL, urlencoding::encode(&text))
    }

    pub fn copy_link(&mut self, post_id: &PostId) -> Result<ShareOutcome> {
        let link = self.link(post_id);
        self.target = None;

        self.clipboard.write_text(&link).map_err(|e| {
            warn!(error = %e, "Clipboard write failed");
            e
        })?;
        info!(post_id = %post_id, "Post link copied");

        Ok(ShareOutcome {
            link,
            notice: Some(COPY_NOTICE),
            opened_url: None,
        })
    }

    pub fn share_whatsapp(&mut self, post_id: &PostId) -> Result<ShareOutcome> {
        let link = self.link(post_id);
        let url = self.whatsapp_url(post_id);
        self.target = None;

        self.opener.open_url(&url).map_err(|e| {
            warn!(error = %e, "WhatsApp share failed");
            e
        })?;
        info!(post_id = %post_id, "Post shared to WhatsApp");

        Ok(ShareOutcome {
            link,
            notice: None,
            opened_url: Some(url),
        })
    }

    /// Copy the link, then open Instagram. Both are attempted; the first
    /// failure is returned.
    pub fn share_instagram(&mut self, post_id: &PostId) -> Result<ShareOutcome> {
        let link = self.link(post_id);
        self.target = None;

        let copied = self.clipboard.write_text(&link);
        let opened = self.opener.open_url(INSTAGRAM_URL);
        if let Err(e) = &copied {
            warn!(error = %e, "Clipboard write failed");
        }
        if let Err(e) = &opened {
            warn!(error = %e, "Instagram open failed");
        }
        copied?;
        opened?;
        info!(post_id = %post_id, "Post link copied for Instagram");

        Ok(ShareOutcome {
            link,
            notice: Some(INSTAGRAM_NOTICE),
            opened_url: Some(INSTAGRAM_URL.to_string()),
        })
    }
}

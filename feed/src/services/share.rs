//! # Share Sinks
//!
//! Production implementations of the clipboard and link-opener seams.

use crate::core::error::{AppError, Result};
use crate::core::service::{Clipboard, LinkOpener};
use parking_lot::Mutex;

/// Opens URLs in the user's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open_url(&self, url: &str) -> Result<()> {
        tracing::debug!(url = %url, "Opening external link");
        open::that(url).map_err(|e| AppError::Share(format!("Failed to open {}: {}", url, e)))
    }
}

/// The OS clipboard.
///
/// The handle is opened on first write and then kept, since on X11 the
/// copied text only lives as long as the handle that owns it.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

fn clipboard_error(err: arboard::Error) -> AppError {
    AppError::Share(format!("Clipboard unavailable: {}", err))
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut handle = self.handle.lock();
        if handle.is_none() {
            *handle = Some(arboard::Clipboard::new().map_err(clipboard_error)?);
        }

        let written = match handle.as_mut() {
            Some(clipboard) => clipboard.set_text(text.to_string()),
            None => return Err(AppError::Share("Clipboard unavailable".to_string())),
        };
        if let Err(e) = written {
            // Reopen on the next write
            *handle = None;
            return Err(clipboard_error(e));
        }

        tracing::debug!(text_len = text.len(), "Copied to clipboard");
        Ok(())
    }
}

//! System clipboard access

use arboard::Clipboard;
use tracing::debug;

/// Source of the text sent by the clipboard hotkey
pub trait ClipboardSource {
    /// Current clipboard text, or `None` when there is none or it is unreadable
    fn read_text(&mut self) -> Option<String>;
}

/// The desktop clipboard, opened lazily on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> Option<String> {
        if self.inner.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.inner = Some(clipboard),
                Err(e) => {
                    debug!(error = %e, "clipboard unavailable");
                    return None;
                }
            }
        }

        let clipboard = self.inner.as_mut()?;
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(error = %e, "clipboard holds no text");
                None
            }
        }
    }
}

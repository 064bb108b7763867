//! Events crossing from background contexts into the UI thread
//!
//! The hotkey listener, the tray menu and the signal handler never touch the
//! window directly; they push an [`AppEvent`] and wake the event loop.

use tokio::sync::mpsc;
use tracing::trace;

/// Requests handled by the UI thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Show the overlay if hidden, hide it if shown
    ToggleOverlay,

    /// Send the current clipboard text without touching the overlay
    SendClipboard,

    /// Remove the tray icon and exit
    Quit,
}

impl std::fmt::Display for AppEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppEvent::ToggleOverlay => write!(f, "TOGGLE_OVERLAY"),
            AppEvent::SendClipboard => write!(f, "SEND_CLIPBOARD"),
            AppEvent::Quit => write!(f, "QUIT"),
        }
    }
}

/// The UI thread has gone away and no longer receives events
#[derive(Debug, thiserror::Error)]
#[error("event receiver closed")]
pub struct EventBusClosed;

/// Cloneable handle used by background contexts to reach the UI thread
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<AppEvent>,
    ctx: egui::Context,
}

impl EventSender {
    /// Create a sender that wakes `ctx` after every event
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>, ctx: egui::Context) -> Self {
        Self { tx, ctx }
    }

    /// Queue an event and request a repaint so the UI drains it promptly
    pub fn send(&self, event: AppEvent) -> Result<(), EventBusClosed> {
        self.tx.send(event).map_err(|_| EventBusClosed)?;
        trace!(%event, "event queued");
        self.ctx.request_repaint();
        Ok(())
    }
}

/// Create the event bus
pub fn channel(ctx: egui::Context) -> (EventSender, mpsc::UnboundedReceiver<AppEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender::new(tx, ctx), rx)
}

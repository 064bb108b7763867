//! System tray integration
//!
//! - Linux: StatusNotifierItem over D-Bus via `ksni`
//! - Windows/macOS: native tray via `tray-icon`
//!
//! Both backends only post [`AppEvent`]s; the UI thread does the work.

mod icon;
mod notification;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::TrayController;

#[cfg(not(target_os = "linux"))]
mod native;
#[cfg(not(target_os = "linux"))]
pub use native::TrayController;

pub use notification::show_startup;

use crate::events::AppEvent;

/// Application name shown in the tray and notifications
pub const APP_TITLE: &str = "Discord Webhook Sender";

/// Entries of the tray menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Show,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 2] = [MenuAction::Show, MenuAction::Quit];

    /// Stable menu item id
    pub fn id(self) -> &'static str {
        match self {
            MenuAction::Show => "show",
            MenuAction::Quit => "quit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Show => "Show",
            MenuAction::Quit => "Quit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }

    /// Event posted when the entry is clicked
    pub fn event(self) -> AppEvent {
        match self {
            MenuAction::Show => AppEvent::ToggleOverlay,
            MenuAction::Quit => AppEvent::Quit,
        }
    }
}

/// Errors that can occur while creating the tray icon
#[derive(Debug, thiserror::Error)]
pub enum TrayError {
    #[error("failed to build tray icon: {0}")]
    Build(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_routing() {
        assert_eq!(MenuAction::from_id("show"), Some(MenuAction::Show));
        assert_eq!(MenuAction::from_id("quit"), Some(MenuAction::Quit));
        assert_eq!(MenuAction::from_id("settings"), None);
        assert_eq!(MenuAction::Show.event(), AppEvent::ToggleOverlay);
        assert_eq!(MenuAction::Quit.event(), AppEvent::Quit);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(MenuAction::Show.id(), MenuAction::Quit.id());
    }
}

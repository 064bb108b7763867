//! Native tray backend (Windows and macOS)

use tokio::runtime::Handle;
use tracing::{debug, info, warn};
use tray_icon::menu::{Menu, MenuEvent, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use super::icon::{render_rgba, ICON_SIZE};
use super::{MenuAction, TrayError, APP_TITLE};
use crate::events::EventSender;

/// Owns the tray icon; lives on the UI thread
pub struct TrayController {
    tray: Option<TrayIcon>,
}

impl TrayController {
    /// Create the tray icon and route menu clicks to `events`
    ///
    /// Must be called on the UI thread after the event loop has started.
    pub fn start(events: EventSender, _runtime: &Handle) -> Result<Self, TrayError> {
        let menu = Menu::new();
        for action in MenuAction::ALL {
            let item = MenuItem::with_id(action.id(), action.label(), true, None);
            menu.append(&item)
                .map_err(|e| TrayError::Build(format!("menu: {e}")))?;
        }

        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            let Some(action) = MenuAction::from_id(event.id.0.as_str()) else {
                return;
            };
            debug!(?action, "tray menu activated");
            if events.send(action.event()).is_err() {
                warn!("failed to forward tray action - UI gone?");
            }
        }));

        let icon = Icon::from_rgba(render_rgba(ICON_SIZE), ICON_SIZE, ICON_SIZE)
            .map_err(|e| TrayError::Build(e.to_string()))?;

        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(APP_TITLE)
            .with_icon(icon)
            .build()
            .map_err(|e| TrayError::Build(e.to_string()))?;

        info!("tray icon created");
        Ok(Self { tray: Some(tray) })
    }

    /// Hide and drop the tray icon
    pub fn shutdown(&mut self) {
        if let Some(tray) = self.tray.take() {
            if let Err(e) = tray.set_visible(false) {
                warn!(error = %e, "failed to hide tray icon");
            }
        }
    }
}

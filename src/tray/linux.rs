//! StatusNotifierItem tray backend

use std::time::Duration;

use ksni::TrayMethods;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use super::icon::{render_rgba, rgba_to_argb, ICON_SIZE};
use super::{MenuAction, TrayError, APP_TITLE};
use crate::events::EventSender;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Tray item exported over D-Bus
struct SenderTray {
    events: EventSender,
}

impl SenderTray {
    fn post(&self, action: MenuAction) {
        debug!(?action, "tray menu activated");
        if self.events.send(action.event()).is_err() {
            warn!("failed to forward tray action - UI gone?");
        }
    }
}

impl ksni::Tray for SenderTray {
    fn id(&self) -> String {
        env!("CARGO_PKG_NAME").into()
    }

    fn title(&self) -> String {
        APP_TITLE.into()
    }

    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        vec![ksni::Icon {
            width: ICON_SIZE as i32,
            height: ICON_SIZE as i32,
            data: rgba_to_argb(&render_rgba(ICON_SIZE)),
        }]
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        ksni::ToolTip {
            title: APP_TITLE.into(),
            ..Default::default()
        }
    }

    fn menu(&self) -> Vec<ksni::MenuItem<Self>> {
        use ksni::menu::*;

        MenuAction::ALL
            .into_iter()
            .map(|action| -> ksni::MenuItem<Self> {
                StandardItem {
                    label: action.label().into(),
                    activate: Box::new(move |this: &mut SenderTray| this.post(action)),
                    ..Default::default()
                }
                .into()
            })
            .collect()
    }
}

/// Owns the exported tray item
pub struct TrayController {
    handle: Option<ksni::Handle<SenderTray>>,
    runtime: Handle,
}

impl TrayController {
    /// Export the tray item on the session bus
    ///
    /// Must not be called from inside the runtime.
    pub fn start(events: EventSender, runtime: &Handle) -> Result<Self, TrayError> {
        let tray = SenderTray { events };
        let handle = runtime
            .block_on(tray.spawn())
            .map_err(|e| TrayError::Build(e.to_string()))?;

        info!("tray icon created via ksni/D-Bus");
        Ok(Self {
            handle: Some(handle),
            runtime: runtime.clone(),
        })
    }

    /// Remove the tray item; waits briefly for D-Bus to acknowledge
    pub fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        let removed = self
            .runtime
            .block_on(async { tokio::time::timeout(SHUTDOWN_TIMEOUT, handle.shutdown()).await });
        match removed {
            Ok(_) => debug!("tray icon removed"),
            Err(_) => warn!("timed out removing tray icon"),
        }
    }
}

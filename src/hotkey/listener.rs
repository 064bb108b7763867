//! Global hotkey listener
//!
//! Registers the two configured bindings with the OS through `global-hotkey`
//! (the OS consumes the key press, so it never reaches the focused app) and
//! forwards matching presses to the UI thread from a dedicated thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tracing::{debug, error, info, warn};

use super::keys::{KeyCombo, KeyParseError};
use crate::events::{AppEvent, EventSender};

/// How often the listener thread re-checks its running flag
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Errors that can occur in the hotkey listener
#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("invalid hotkey `{descriptor}`: {source}")]
    Parse {
        descriptor: String,
        source: KeyParseError,
    },

    #[error("failed to initialize global hotkeys: {0}")]
    Manager(global_hotkey::Error),

    #[error("failed to register hotkey `{descriptor}`: {source}")]
    Register {
        descriptor: String,
        source: global_hotkey::Error,
    },

    #[error("no hotkey could be registered")]
    NoBindings,

    #[error("failed to spawn listener thread: {0}")]
    ThreadSpawn(String),
}

/// Maps OS hotkey ids to the events they raise
#[derive(Debug, Default, Clone)]
pub struct HotkeyRouter {
    routes: Vec<(u32, AppEvent)>,
}

impl HotkeyRouter {
    pub fn add(&mut self, hotkey: &HotKey, event: AppEvent) {
        self.routes.push((hotkey.id(), event));
    }

    /// Event for a key transition; releases are ignored so one press is one event
    pub fn route(&self, id: u32, state: HotKeyState) -> Option<AppEvent> {
        if state != HotKeyState::Pressed {
            return None;
        }
        self.routes
            .iter()
            .find(|(route_id, _)| *route_id == id)
            .map(|(_, event)| *event)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Owns the OS registrations and the forwarding thread
pub struct HotkeyListener {
    manager: GlobalHotKeyManager,
    hotkeys: Vec<HotKey>,
    running: Arc<AtomicBool>,
}

impl HotkeyListener {
    /// Register the primary (toggle) and secondary (clipboard) bindings and
    /// start forwarding presses to `events`
    ///
    /// Must be called on the UI thread. A binding that fails is logged and
    /// skipped; an error is returned only when nothing could be registered.
    pub fn start(primary: &str, secondary: &str, events: EventSender) -> Result<Self, HotkeyError> {
        let manager = GlobalHotKeyManager::new().map_err(HotkeyError::Manager)?;

        let mut router = HotkeyRouter::default();
        let mut hotkeys = Vec::new();

        for (descriptor, event) in [
            (primary, AppEvent::ToggleOverlay),
            (secondary, AppEvent::SendClipboard),
        ] {
            match register(&manager, descriptor) {
                Ok(hotkey) => {
                    info!(hotkey = descriptor, %event, "hotkey registered");
                    router.add(&hotkey, event);
                    hotkeys.push(hotkey);
                }
                Err(e) => error!(error = %e, "hotkey unavailable"),
            }
        }

        if router.is_empty() {
            return Err(HotkeyError::NoBindings);
        }

        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);

        thread::Builder::new()
            .name("hotkey-listener".to_string())
            .spawn(move || {
                info!("hotkey listener thread started");
                run_event_loop(&router, &events, &thread_running);
                thread_running.store(false, Ordering::SeqCst);
                info!("hotkey listener thread stopped");
            })
            .map_err(|e| HotkeyError::ThreadSpawn(e.to_string()))?;

        Ok(Self {
            manager,
            hotkeys,
            running,
        })
    }

    /// Unregister all bindings and let the listener thread exit
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if self.hotkeys.is_empty() {
            return;
        }
        if let Err(e) = self.manager.unregister_all(&self.hotkeys) {
            warn!(error = %e, "failed to unregister hotkeys");
        }
        self.hotkeys.clear();
    }
}

impl Drop for HotkeyListener {
    fn drop(&mut self) {
        self.stop();
    }
}

fn register(manager: &GlobalHotKeyManager, descriptor: &str) -> Result<HotKey, HotkeyError> {
    let hotkey = KeyCombo::parse(descriptor)
        .map_err(|source| HotkeyError::Parse {
            descriptor: descriptor.to_string(),
            source,
        })?
        .to_hotkey();

    manager
        .register(hotkey)
        .map_err(|source| HotkeyError::Register {
            descriptor: descriptor.to_string(),
            source,
        })?;

    Ok(hotkey)
}

fn run_event_loop(router: &HotkeyRouter, events: &EventSender, running: &AtomicBool) {
    let receiver = GlobalHotKeyEvent::receiver();

    while running.load(Ordering::SeqCst) {
        let Ok(hotkey_event) = receiver.recv_timeout(POLL_INTERVAL) else {
            continue;
        };

        let Some(event) = router.route(hotkey_event.id(), hotkey_event.state()) else {
            continue;
        };

        debug!(%event, "hotkey pressed");
        if events.send(event).is_err() {
            warn!("failed to forward hotkey event - UI gone?");
            break;
        }
    }
}

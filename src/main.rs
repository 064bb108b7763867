//! hookpost: post quick messages to a Discord webhook from anywhere
//!
//! Runs in the background with a tray icon and provides:
//! - A global hotkey that toggles a small always-on-top input box
//! - A second global hotkey that sends the clipboard text
//! - Fire-and-forget delivery to the configured webhook
//!
//! Nothing here is fatal except failing to start the runtime or the event
//! loop; hotkeys and tray each degrade on their own.

#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

mod clipboard;
mod config;
mod events;
mod hotkey;
mod lifecycle;
mod overlay;
mod state;
mod tray;
mod webhook;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::runtime::Handle;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::hotkey::HotkeyListener;
use crate::lifecycle::ShutdownSignal;
use crate::overlay::{OverlayApp, OverlayController, Services};
use crate::tray::TrayController;
use crate::webhook::WebhookClient;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "hookpost starting");

    // Load configuration
    let config = Arc::new(Config::load());
    info!(
        hotkey = %config.hotkey,
        hotkey_clipboard = %config.hotkey_clipboard,
        "configuration loaded"
    );
    if !config.is_webhook_configured() {
        warn!(
            path = ?Config::default_path(),
            "webhook_url is not set - messages will be dropped"
        );
    }

    // Background runtime for deliveries, the D-Bus tray and signal handling.
    // The main thread belongs to the window event loop.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("hookpost-worker")
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let handle = runtime.handle().clone();

    let result = eframe::run_native(
        env!("CARGO_PKG_NAME"),
        overlay::native_options(),
        Box::new(move |cc| Ok(Box::new(build_app(cc, config, handle)))),
    );

    // In-flight deliveries are abandoned
    info!("shutting down...");
    runtime.shutdown_background();

    result.map_err(|e| anyhow!("event loop failed: {e}"))?;
    info!("hookpost stopped");
    Ok(())
}

/// Wire platform services to the UI; runs on the UI thread once the event
/// loop is up
fn build_app(cc: &eframe::CreationContext<'_>, config: Arc<Config>, runtime: Handle) -> OverlayApp {
    // Background contexts -> UI thread
    let (events, events_rx) = events::channel(cc.egui_ctx.clone());

    let hotkeys = match HotkeyListener::start(&config.hotkey, &config.hotkey_clipboard, events.clone())
    {
        Ok(listener) => {
            info!("hotkey listener started");
            Some(listener)
        }
        Err(e) => {
            error!(error = %e, "failed to start hotkey listener");
            warn!("continuing without hotkey support - the tray menu still works");
            None
        }
    };

    let tray = match TrayController::start(events.clone(), &runtime) {
        Ok(tray) => Some(tray),
        Err(e) => {
            error!(error = %e, "failed to create tray icon");
            None
        }
    };

    ShutdownSignal::new().forward_to(events, &runtime);

    let notify_config = Arc::clone(&config);
    runtime.spawn_blocking(move || tray::show_startup(&notify_config));

    let webhook = WebhookClient::new(config.webhook_url.as_str(), runtime);
    let controller = OverlayController::new(Arc::new(webhook), Box::new(SystemClipboard::default()));

    info!("initialized, waiting for hotkeys");
    OverlayApp::new(controller, events_rx, Services { hotkeys, tray })
}

//! Startup desktop notification

use std::time::Duration;

use notify_rust::{Notification, Timeout};
use tracing::{debug, warn};

use crate::config::Config;

const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(3);

/// Body of the startup notification
pub fn startup_message(config: &Config) -> String {
    format!(
        "Open: {}\nSend clipboard: {}",
        config.hotkey.to_uppercase(),
        config.hotkey_clipboard.to_uppercase()
    )
}

/// Show the "ready" notification; blocks on some platforms, so call it off
/// the UI thread
pub fn show_startup(config: &Config) {
    let body = startup_message(config);
    let result = Notification::new()
        .appname(super::APP_TITLE)
        .summary("Ready")
        .body(&body)
        .timeout(Timeout::Milliseconds(NOTIFICATION_TIMEOUT.as_millis() as u32))
        .show();

    match result {
        Ok(_) => debug!("startup notification shown"),
        Err(e) => warn!(error = %e, "could not show startup notification"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_message_uppercases_hotkeys() {
        assert_eq!(
            startup_message(&Config::default()),
            "Open: CTRL+K\nSend clipboard: CTRL+ALT+K"
        );
    }
}

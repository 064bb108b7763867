//! Signal handling for graceful shutdown
//!
//! SIGTERM/SIGINT (Ctrl-C elsewhere) are turned into [`AppEvent::Quit`] so a
//! terminal or service stop takes the same path as the tray "Quit".

use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::events::{AppEvent, EventSender};

/// Handles shutdown signals
pub struct ShutdownSignal;

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        Self
    }

    /// Wait for a shutdown signal
    #[cfg(unix)]
    pub async fn wait(&self) -> std::io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        tokio::select! {
            _ = sigterm.recv() => {
                debug!("received SIGTERM");
            }
            _ = sigint.recv() => {
                debug!("received SIGINT");
            }
        }
        Ok(())
    }

    /// Wait for a shutdown signal
    #[cfg(not(unix))]
    pub async fn wait(&self) -> std::io::Result<()> {
        tokio::signal::ctrl_c().await?;
        debug!("received Ctrl-C");
        Ok(())
    }

    /// Forward the first shutdown signal to the UI thread as a quit request
    pub fn forward_to(self, events: EventSender, runtime: &Handle) {
        runtime.spawn(async move {
            match self.wait().await {
                Ok(()) => {
                    info!("shutdown signal received");
                    if events.send(AppEvent::Quit).is_err() {
                        debug!("UI already gone");
                    }
                }
                Err(e) => warn!(error = %e, "failed to install signal handlers"),
            }
        });
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

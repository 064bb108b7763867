//! Overlay window
//!
//! The borderless input box and the glue between UI-thread events, the
//! overlay state machine and the webhook.

mod controller;
mod layout;
mod window;

pub use controller::OverlayController;
pub use window::{native_options, OverlayApp, Services};
